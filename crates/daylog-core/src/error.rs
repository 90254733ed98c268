//! Error types for Daylog core operations.
//!
//! Errors are descriptive at the core level; the CLI layer maps them to
//! user-facing messages. A missing mutation or migration target is not an
//! error: those operations return `Ok(None)` instead.

use thiserror::Error;

/// Result type alias for Daylog operations.
pub type Result<T> = std::result::Result<T, DaylogError>;

/// Core error type for Daylog operations.
#[derive(Debug, Error)]
pub enum DaylogError {
    /// The store handle is not usable (never opened, or its lock is poisoned)
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Incorrect passphrase during decryption
    #[error("Incorrect passphrase")]
    IncorrectPassphrase,

    /// Journal file not found
    #[error("Journal file not found")]
    JournalNotFound,

    /// Encryption or decryption error
    #[error("Encryption error: {0}")]
    Crypto(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage backend error (generic)
    #[error("Storage error: {0}")]
    Storage(String),

    /// SQLite-specific storage error
    #[error("SQLite error: {source}")]
    Sqlite {
        #[from]
        source: rusqlite::Error,
    },

    /// Invalid user input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O error
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization error
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl DaylogError {
    /// Stable label for structured logging.
    pub fn label(&self) -> &'static str {
        match self {
            DaylogError::StoreUnavailable(_) => "store_unavailable",
            DaylogError::IncorrectPassphrase => "incorrect_passphrase",
            DaylogError::JournalNotFound => "journal_not_found",
            DaylogError::Crypto(_) => "crypto",
            DaylogError::Validation(_) => "validation",
            DaylogError::Storage(_)
            | DaylogError::Sqlite { .. }
            | DaylogError::Io { .. }
            | DaylogError::Json { .. } => "write_failure",
            DaylogError::InvalidInput(_) => "invalid_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_group_persistence_failures() {
        let io = DaylogError::from(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert_eq!(io.label(), "write_failure");
        assert_eq!(DaylogError::Storage("x".into()).label(), "write_failure");
        assert_eq!(
            DaylogError::StoreUnavailable("closed".into()).label(),
            "store_unavailable"
        );
    }

    #[test]
    fn test_display_includes_detail() {
        let err = DaylogError::InvalidInput("content cannot be empty".into());
        assert_eq!(err.to_string(), "Invalid input: content cannot be empty");
    }
}
