use std::io;
use thiserror::Error;

/**
 * Errors that end a peer run. Every kind is fatal and local to one peer:
 * nothing is retried and nothing propagates to the other side, which
 * will fail on its own I/O if it is affected at all.
 */
#[derive(Debug, Error)]
pub enum ExchangeError {
    ///The responder could not bind its listening port.
    #[error("failed to bind port {port}: {source}")]
    Bind { port: u16, source: io::Error },

    ///The initiator could not reach the responder.
    #[error("failed to connect to {address}: {source}")]
    Connect { address: String, source: io::Error },

    ///The stream failed mid-exchange.
    #[error("stream error during the exchange: {0}")]
    Stream(#[from] io::Error),

    ///The peer was given a partial or inconsistent configuration.
    #[error("invalid peer configuration: {0}")]
    Configuration(String),
}

/**
 * Result type for exchange operations.
 */
pub type ExchangeResult<T> = Result<T, ExchangeError>;
