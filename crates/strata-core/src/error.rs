//! Error types for the Strata library.
//!
//! This module defines the foundational error type shared by the
//! higher-level crates, which wrap it via `#[from]` conversions.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Compounding frequency is neither continuous nor a positive integer.
    #[error("Invalid compounding frequency: {value} (expected a positive integer or continuous)")]
    InvalidFrequency {
        /// The rejected frequency, as supplied.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Error parsing or handling a calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },
}

impl CoreError {
    /// Creates an invalid frequency error.
    #[must_use]
    pub fn invalid_frequency(value: f64) -> Self {
        Self::InvalidFrequency { value }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
