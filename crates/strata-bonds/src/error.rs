//! Error types for bond operations.

use thiserror::Error;

use strata_core::CoreError;
use strata_math::MathError;

/// A specialized Result type for bond operations.
pub type BondResult<T> = Result<T, BondError>;

/// Errors that can occur during bond operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BondError {
    /// Instrument parameters violate a construction invariant.
    #[error("Invalid instrument: {reason}")]
    Construction {
        /// Description of what's invalid.
        reason: String,
    },

    /// Yield solve exhausted its iteration budget.
    #[error("Yield calculation failed to converge after {iterations} iterations (residual: {residual:.2e})")]
    NoConvergence {
        /// Number of iterations attempted.
        iterations: u32,
        /// Final pricing residual.
        residual: f64,
    },

    /// Operation needs a finite cash-flow schedule the instrument cannot
    /// provide.
    #[error("{operation} is not supported for {instrument} instruments")]
    UnsupportedInstrumentClass {
        /// The instrument class.
        instrument: String,
        /// The attempted operation.
        operation: String,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },

    /// Core library error.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    /// Numerical error.
    #[error("Math error: {0}")]
    Math(#[from] MathError),
}

impl BondError {
    /// Creates a construction error.
    #[must_use]
    pub fn construction(reason: impl Into<String>) -> Self {
        Self::Construction {
            reason: reason.into(),
        }
    }

    /// Creates an unsupported instrument class error.
    #[must_use]
    pub fn unsupported(instrument: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::UnsupportedInstrumentClass {
            instrument: instrument.into(),
            operation: operation.into(),
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
        let err = BondError::unsupported("Perpetuity", "cash-flow decomposition");
        assert_eq!(
            err.to_string(),
            "cash-flow decomposition is not supported for Perpetuity instruments"
        );

        let err: BondError = MathError::convergence_failed(3, 0.1).into();
        assert!(matches!(err, BondError::Math(_)));
    }
}
