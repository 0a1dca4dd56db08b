//! Error types for Monok operations

/// Result type for Monok operations
pub type Result<T> = std::result::Result<T, MonokError>;

/// Error types for the Monok memory engine
#[derive(Debug, thiserror::Error)]
pub enum MonokError {
    /// Storage backend failed to read or write a document
    #[error("Storage error: {0}")]
    Storage(String),

    /// Identity cannot be used as a storage key
    #[error("Invalid identity: {0:?}")]
    InvalidIdentity(String),

    /// Category outside the fixed vocabulary
    #[error("Invalid category '{value}'. Allowed: {allowed}")]
    InvalidCategory { value: String, allowed: String },

    /// Enumerated field outside its allow-list
    #[error("Invalid {field} '{value}'. Allowed: {allowed}")]
    InvalidValue {
        field: &'static str,
        value: String,
        allowed: String,
    },

    /// Caller input that cannot be acted on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Referenced record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for MonokError {
    fn from(s: String) -> Self {
        MonokError::Other(s)
    }
}

impl From<&str> for MonokError {
    fn from(s: &str) -> Self {
        MonokError::Other(s.to_string())
    }
}

impl From<figment::Error> for MonokError {
    fn from(err: figment::Error) -> Self {
        MonokError::Configuration(err.to_string())
    }
}
