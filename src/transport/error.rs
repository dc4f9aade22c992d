use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("connection to {address} failed: {source}")]
    Io {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("connection to {address} not established within {timeout:?}")]
    Timeout { address: String, timeout: Duration },
    #[error("connection task for {address} aborted")]
    Aborted { address: String },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("write to {address} failed: {message}")]
    Write { address: String, message: String },
}
