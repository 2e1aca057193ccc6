//! CLI error types.

use thiserror::Error;

use navcalc_core::NavError;
use navcalc_data::SourceError;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid investment amount.
    #[error("Invalid amount: {0}. Must be a positive number.")]
    InvalidAmount(f64),

    /// Invalid argument value.
    #[error("Invalid value for {name}: {value}")]
    InvalidArgument {
        /// Argument name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// NAV history could not be loaded.
    #[error("Data source error: {0}")]
    Source(#[from] SourceError),

    /// Core type error.
    #[error(transparent)]
    Nav(#[from] NavError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
