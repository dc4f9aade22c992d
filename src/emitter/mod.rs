mod config;
mod error;
mod scheduler;

pub use config::{EmitterConfig, DEFAULT_POSITION_INTERVAL_MS, DEFAULT_UTM_INTERVAL_MS};
pub use error::EmitterError;
pub use scheduler::{RunSummary, Scheduler, SchedulerState, StopReason};
