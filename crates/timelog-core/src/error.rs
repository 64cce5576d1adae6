//! Error types for Timelog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps these
//! to user-facing messages and exit codes.

use thiserror::Error;

/// Result type alias for Timelog operations.
pub type Result<T> = std::result::Result<T, TimelogError>;

/// Core error type for Timelog operations.
#[derive(Debug, Error)]
pub enum TimelogError {
    /// Missing or empty required field, malformed timestamp
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation referenced an id that does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Export requested with no entries
    #[error("Nothing to export")]
    EmptyCollection,

    /// Stored collection could not be read or parsed
    #[error("Persistence read error: {0}")]
    PersistenceRead(String),

    /// Collection could not be written to the backend
    #[error("Persistence write error: {0}")]
    PersistenceWrite(String),

    /// Key-value backend error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Encoding or decoding error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Intent is not valid in the current edit state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl TimelogError {
    /// Whether this error should be shown to the user as a plain message.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            TimelogError::Validation(_)
                | TimelogError::NotFound(_)
                | TimelogError::EmptyCollection
                | TimelogError::InvalidState(_)
        )
    }
}

impl From<std::io::Error> for TimelogError {
    fn from(err: std::io::Error) -> Self {
        TimelogError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for TimelogError {
    fn from(err: serde_json::Error) -> Self {
        TimelogError::Serialization(err.to_string())
    }
}

impl From<rusqlite::Error> for TimelogError {
    fn from(err: rusqlite::Error) -> Self {
        TimelogError::Storage(format!("SQLite error: {}", err))
    }
}
