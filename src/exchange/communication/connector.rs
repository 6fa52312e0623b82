use super::line_stream::LineStream;
use crate::exchange::error::{ExchangeError, ExchangeResult};
use std::net::TcpStream;

/**
 * Connects to the responder's listening socket. The attempt is made
 * exactly once; an unreachable responder is surfaced as a connect error
 * and never retried.
 *
 * # Arguments
 *
 * `address` - Responder's address.
 *
 * `port` - Responder's listening port.
 */
pub fn connect(address: &str, port: u16) -> ExchangeResult<LineStream> {
    let endpoint = format!("{}:{}", address, port);

    match TcpStream::connect(&endpoint) {
        Ok(stream) => {
            tracing::info!("connected to {}", endpoint);
            Ok(LineStream::new(stream)?)
        }
        Err(source) => Err(ExchangeError::Connect {
            address: endpoint,
            source,
        }),
    }
}
