use thiserror::Error;

#[derive(Debug, Error)]
pub enum SavingsCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for SavingsCalcError {
    fn from(e: serde_json::Error) -> Self {
        SavingsCalcError::SerializationError(e.to_string())
    }
}
