//! Error types for lattice operations.

use thiserror::Error;

use strata_curves::CurveError;
use strata_math::MathError;

/// A specialized Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors that can occur while building, calibrating or pricing on a tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LatticeError {
    /// The per-period minimizer could not even bracket a minimum.
    #[error("Calibration of period {period} failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    NoConvergence {
        /// The period being calibrated.
        period: usize,
        /// Number of iterations attempted.
        iterations: u32,
        /// Final residual value.
        residual: f64,
    },

    /// The tree does not reach far enough for the requested operation.
    #[error("Tree has {available} steps but {required} are required")]
    InsufficientSteps {
        /// Steps needed.
        required: usize,
        /// Steps present.
        available: usize,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Curve error.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl LatticeError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient steps error.
    #[must_use]
    pub fn insufficient_steps(required: usize, available: usize) -> Self {
        Self::InsufficientSteps {
            required,
            available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LatticeError::insufficient_steps(10, 4);
        assert_eq!(err.to_string(), "Tree has 4 steps but 10 are required");

        let err: LatticeError = MathError::convergence_failed(50, 1.0).into();
        assert!(matches!(err, LatticeError::Math(_)));
    }
}
