use super::line_stream::LineStream;
use crate::exchange::error::{ExchangeError, ExchangeResult};
use std::net::TcpListener;

/**
 * Binds the listening socket the responder waits on. A port already in
 * use is surfaced as a bind error and never retried.
 *
 * # Arguments
 *
 * `port` - Port where the responder will be listening for the connection.
 */
pub fn bind(port: u16) -> ExchangeResult<TcpListener> {
    match TcpListener::bind(format!("0.0.0.0:{}", port)) {
        Ok(listener) => {
            tracing::info!("listening on port {}", port);
            Ok(listener)
        }
        Err(source) => Err(ExchangeError::Bind { port, source }),
    }
}

/**
 * Accepts exactly one incoming connection, blocking indefinitely until
 * the initiator connects.
 *
 * # Arguments
 *
 * `listener` - Bound listening socket.
 */
pub fn accept(listener: &TcpListener) -> ExchangeResult<LineStream> {
    let (stream, peer_address) = listener.accept()?;
    tracing::info!("accepted connection from {}", peer_address);

    Ok(LineStream::new(stream)?)
}
