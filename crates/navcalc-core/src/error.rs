//! Error types for NavCalc core.
//!
//! Only fallible *construction* surfaces here (user-supplied dates, cadence
//! names, NAV values). The valuation engine itself never fails: missing data
//! is reported through structured outcomes instead.

use thiserror::Error;

/// A specialized Result type for NavCalc core operations.
pub type NavResult<T> = Result<T, NavError>;

/// The main error type for NavCalc core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NavError {
    /// Invalid or unparseable calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// NAV value that is not a finite positive number.
    #[error("Invalid NAV: {value} - {reason}")]
    InvalidNav {
        /// The rejected NAV value.
        value: f64,
        /// Reason for invalidity.
        reason: String,
    },

    /// Unknown investment cadence.
    #[error("Unknown cadence: {value}")]
    InvalidCadence {
        /// The unrecognized cadence string.
        value: String,
    },

    /// Unknown holding period preset.
    #[error("Unknown holding period: {value}")]
    InvalidPeriod {
        /// The unrecognized period string.
        value: String,
    },
}

impl NavError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid NAV error.
    #[must_use]
    pub fn invalid_nav(value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidNav {
            value,
            reason: reason.into(),
        }
    }

    /// Creates an unknown cadence error.
    #[must_use]
    pub fn invalid_cadence(value: impl Into<String>) -> Self {
        Self::InvalidCadence {
            value: value.into(),
        }
    }

    /// Creates an unknown holding period error.
    #[must_use]
    pub fn invalid_period(value: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));

        let err = NavError::invalid_nav(-1.5, "must be positive");
        assert!(err.to_string().contains("-1.5"));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_cadence_error() {
        let err = NavError::invalid_cadence("fortnightly");
        assert_eq!(err.to_string(), "Unknown cadence: fortnightly");
    }
}
