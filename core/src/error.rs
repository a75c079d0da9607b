use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    /// Required columns absent, or zero valid data rows after parsing.
    /// Ingestion is the only fallible computation in the engine.
    #[error("Malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("Unknown representative '{name}'")]
    UnknownRep { name: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EngineError {
    pub fn missing_columns(missing: &[&str]) -> Self {
        Self::MalformedInput {
            reason: format!("missing required columns: {}", missing.join(", ")),
        }
    }

    pub fn no_data_rows() -> Self {
        Self::MalformedInput {
            reason: "no valid data rows after parsing".to_string(),
        }
    }
}

pub type EngineResult<T> = Result<T, EngineError>;
