//! Error types for the Ergon evidence engine
//!
//! This module provides structured error definitions using thiserror, with
//! anyhow available for propagation in the binary.
//!
//! Note that malformed *content* never produces an error anywhere in the
//! engine: unparseable documents degrade to partial records, and unparseable
//! dates degrade to "no constraint". `ErgonError` exists for the config/CLI
//! boundary and for truly invalid API usage.

use thiserror::Error;

/// Main error type for Ergon operations
#[derive(Error, Debug)]
pub enum ErgonError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Date parsing error
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] chrono::ParseError),

    /// Caller-supplied filter value is invalid (unknown category, bad threshold)
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Ergon operations
pub type Result<T> = std::result::Result<T, ErgonError>;

/// Convert anyhow::Error to ErgonError
impl From<anyhow::Error> for ErgonError {
    fn from(err: anyhow::Error) -> Self {
        ErgonError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ErgonError::InvalidFilter("threshold must be in [0, 1]".to_string());
        assert_eq!(err.to_string(), "Invalid filter: threshold must be in [0, 1]");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let ergon_err: ErgonError = io_err.into();
        assert!(matches!(ergon_err, ErgonError::Io(_)));
    }
}
