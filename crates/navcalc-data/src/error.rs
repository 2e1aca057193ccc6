//! Error types for NAV history sources.

use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while loading NAV histories.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No history exists for the requested scheme
    #[error("scheme not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),
}

impl SourceError {
    /// Creates a not-found error for a scheme code.
    #[must_use]
    pub fn not_found(scheme_code: impl Into<String>) -> Self {
        SourceError::NotFound(scheme_code.into())
    }

    /// Creates a parse error with the offending location.
    #[must_use]
    pub fn parse(location: impl std::fmt::Display, reason: impl std::fmt::Display) -> Self {
        SourceError::ParseError(format!("{location}: {reason}"))
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::IoError(e.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::ParseError(e.to_string())
    }
}

impl From<csv::Error> for SourceError {
    fn from(e: csv::Error) -> Self {
        if e.is_io_error() {
            SourceError::IoError(e.to_string())
        } else {
            SourceError::ParseError(e.to_string())
        }
    }
}
