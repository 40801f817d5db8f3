use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EscrowError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invariant violation in {context}: residual shortage of {shortfall} after solving")]
    InvariantViolation { context: String, shortfall: Decimal },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EscrowError {
    fn from(e: serde_json::Error) -> Self {
        EscrowError::SerializationError(e.to_string())
    }
}
