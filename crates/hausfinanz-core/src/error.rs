use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    /// A record that is structurally incomplete or inconsistent
    #[error("Malformed record: {0}")]
    DataError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for PlannerError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            // Well-formed JSON whose shape does not match the record type.
            serde_json::error::Category::Data => PlannerError::DataError(e.to_string()),
            _ => PlannerError::SerializationError(e.to_string()),
        }
    }
}
