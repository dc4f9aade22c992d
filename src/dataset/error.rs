use thiserror::Error;

use crate::telemetry::ScaleError;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("dataset read error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: field {field} is not a number: {value:?}")]
    InvalidNumber {
        row: usize,
        field: &'static str,
        value: String,
    },
    #[error("row {row}: system id is not in 0..=255: {value:?}")]
    InvalidSystemId { row: usize, value: String },
    #[error("row {row}: uas_id is not valid hex: {source}")]
    UasIdHex {
        row: usize,
        #[source]
        source: hex::FromHexError,
    },
    #[error("row {row}: uas_id must be {expected} bytes, got {actual}")]
    UasIdLength {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("row {row}: {source}")]
    OutOfRange {
        row: usize,
        #[source]
        source: ScaleError,
    },
    #[error("dataset contains no usable samples")]
    Empty,
}

impl DatasetError {
    /// Row number (1-based, header excluded) the error refers to, if any.
    pub fn row(&self) -> Option<usize> {
        match self {
            DatasetError::InvalidNumber { row, .. }
            | DatasetError::InvalidSystemId { row, .. }
            | DatasetError::UasIdHex { row, .. }
            | DatasetError::UasIdLength { row, .. }
            | DatasetError::OutOfRange { row, .. } => Some(*row),
            DatasetError::Io(_) | DatasetError::Csv(_) | DatasetError::Empty => None,
        }
    }
}
