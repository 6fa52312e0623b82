/**
 * Binds the responder's listener and accepts the initiator's connection.
 */
pub mod acceptor;
/**
 * Connects to the responder's listener.
 */
pub mod connector;
/**
 * Newline-delimited framing over the TCP stream.
 */
pub mod line_stream;
