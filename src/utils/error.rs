use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Data file {path} is corrupt: {reason}")]
    CorruptData { path: String, reason: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl LedgerError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Recoverable caller mistakes, as opposed to storage or config trouble.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError { .. } | Self::NotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
