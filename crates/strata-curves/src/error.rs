//! Error types for curve operations.
//!
//! Covers curve construction, bootstrapping, parametric fitting and
//! principal component analysis.

use thiserror::Error;

use strata_bonds::BondError;
use strata_core::CoreError;
use strata_math::MathError;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Portfolio maturities do not cover every period exactly once.
    #[error("Portfolio cannot be bootstrapped: {reason}")]
    NotBootstrappable {
        /// Why the portfolio was rejected.
        reason: String,
    },

    /// Requested tenor is outside the curve's valid range.
    #[error("Tenor {requested:.4} out of range [{min:.4}, {max:.4}]")]
    TenorOutOfRange {
        /// The requested tenor in years.
        requested: f64,
        /// Minimum valid tenor.
        min: f64,
        /// Maximum valid tenor.
        max: f64,
    },

    /// An iterative procedure failed to converge.
    #[error("{procedure} failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    NoConvergence {
        /// The procedure that failed.
        procedure: String,
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Bond library error.
    #[error("Bond error: {0}")]
    Bond(#[from] BondError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl CurveError {
    /// Creates a not-bootstrappable error.
    #[must_use]
    pub fn not_bootstrappable(reason: impl Into<String>) -> Self {
        Self::NotBootstrappable {
            reason: reason.into(),
        }
    }

    /// Creates a tenor out of range error.
    #[must_use]
    pub fn tenor_out_of_range(requested: f64, min: f64, max: f64) -> Self {
        Self::TenorOutOfRange {
            requested,
            min,
            max,
        }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CurveError::tenor_out_of_range(12.0, 0.0, 10.0);
        assert_eq!(err.to_string(), "Tenor 12.0000 out of range [0.0000, 10.0000]");

        let err = CurveError::not_bootstrappable("missing period 2");
        assert!(err.to_string().contains("missing period 2"));

        let err: CurveError = BondError::construction("negative periods").into();
        assert!(matches!(err, CurveError::Bond(_)));
    }
}
