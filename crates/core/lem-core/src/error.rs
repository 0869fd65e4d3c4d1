//! Error types for the LEM core

use thiserror::Error;

/// Main error type for LEM operations
///
/// Only configuration and the persistence boundary can fail. Appraisal,
/// drive evaluation and emergence are total and never produce errors.
#[derive(Debug, Error)]
pub enum LemError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// State could not be written
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Convenient Result type using LemError
pub type Result<T> = std::result::Result<T, LemError>;

impl LemError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        LemError::Config(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        LemError::Persistence(msg.into())
    }
}

impl From<tempfile::PersistError> for LemError {
    fn from(err: tempfile::PersistError) -> Self {
        LemError::Persistence(format!("atomic replace failed: {}", err.error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LemError::config("LEM_STATE_DIR is not set");
        assert_eq!(err.to_string(), "Configuration error: LEM_STATE_DIR is not set");

        let err = LemError::persistence("disk full");
        assert_eq!(err.to_string(), "Persistence error: disk full");
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))?;
            Ok(())
        }

        assert!(matches!(fails(), Err(LemError::Io(_))));
    }
}
