mod error;
mod loader;
mod replay;
mod sample;

pub use error::DatasetError;
pub use loader::{Dataset, RowPolicy};
pub use replay::{Replay, ReplayPosition};
pub use sample::{Sample, UasId, UasIdError, UAS_ID_LEN};
