mod error;
mod flags;
mod messages;
pub mod scaling;

pub use error::ScaleError;
pub use flags::Availability;
pub use messages::{MessageKind, Stamp, TelemetryMessage};
pub use scaling::ScaledFields;
