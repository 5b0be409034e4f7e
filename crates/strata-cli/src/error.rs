//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A quote row could not be used.
    #[error("Invalid quote on line {line}: {reason}")]
    InvalidQuote {
        /// 1-based line in the quote file, counting the header.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// The quote file held no rows.
    #[error("No quotes found in {0}")]
    NoQuotes(PathBuf),

    /// Invalid command-line value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Settings file could not be parsed.
    #[error("Configuration error in {path}: {reason}")]
    Config {
        /// Settings file.
        path: PathBuf,
        /// Parser message.
        reason: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CliError {
    /// Creates an invalid quote error.
    pub fn invalid_quote(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidQuote {
            line,
            reason: reason.into(),
        }
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
