use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    #[error("field {field} out of range: {value} scaled by {factor} does not fit {target}")]
    FieldOutOfRange {
        field: &'static str,
        value: f64,
        factor: f64,
        target: &'static str,
    },
}
