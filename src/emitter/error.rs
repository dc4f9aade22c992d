use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::MessageKind;
use crate::transport::TransportError;

#[derive(Debug, Error)]
pub enum EmitterError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("scheduler has already run")]
    NotIdle,
    #[error("no sample in the dataset can be emitted")]
    NothingToEmit,
    #[error("sending {kind} for sample {index} (cycle {cycle}) failed: {source}")]
    Transport {
        kind: MessageKind,
        cycle: u64,
        index: usize,
        #[source]
        source: TransportError,
    },
}
