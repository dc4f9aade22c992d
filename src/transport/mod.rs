mod error;
mod sink;

pub use error::{ConnectError, TransportError};
pub use sink::{connect, MavlinkSink, SourceIdentity, TelemetrySink, DEFAULT_CONNECT_TIMEOUT};
