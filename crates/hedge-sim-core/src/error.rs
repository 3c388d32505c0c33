use thiserror::Error;

#[derive(Debug, Error)]
pub enum HedgeSimError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid sweep for {variable}: {reason}")]
    InvalidSweep { variable: String, reason: String },

    #[error("Unknown {kind}: '{name}'")]
    UnknownField { kind: String, name: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for HedgeSimError {
    fn from(e: serde_json::Error) -> Self {
        HedgeSimError::SerializationError(e.to_string())
    }
}
