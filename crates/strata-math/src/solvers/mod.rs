//! Root-finding algorithms.
//!
//! - [`newton_raphson_bounded`]: Newton-Raphson that keeps every iterate
//!   strictly above a lower bound, with a bisection safeguard
//!
//! # Example: Yield from Price
//!
//! ```rust
//! use strata_math::solvers::{newton_raphson_bounded, SolverConfig};
//!
//! // 5 periods, coupon 5, face 100, price 95
//! let price = |y: f64| {
//!     (1..=5).map(|t| 5.0 / (1.0 + y).powi(t)).sum::<f64>() + 100.0 / (1.0 + y).powi(5)
//! };
//! let d_price = |y: f64| {
//!     -(1..=5).map(|t| f64::from(t) * 5.0 / (1.0 + y).powi(t + 1)).sum::<f64>()
//!         - 500.0 / (1.0 + y).powi(6)
//! };
//!
//! let result = newton_raphson_bounded(
//!     |y| price(y) - 95.0,
//!     d_price,
//!     0.05,
//!     -1.0,
//!     &SolverConfig::default(),
//! )
//! .unwrap();
//! assert!(result.root > 0.05);
//! ```

mod newton;

pub use newton::newton_raphson_bounded;

use serde::{Deserialize, Serialize};

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Result of a root-finding operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final function value at the root.
    pub residual: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = SolverConfig::default()
            .with_tolerance(1e-12)
            .with_max_iterations(25);
        assert_eq!(config, SolverConfig::new(1e-12, 25));
    }

    #[test]
    fn test_config_partial_toml() {
        let config: SolverConfig = toml::from_str("max_iterations = 7").unwrap();
        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.tolerance, DEFAULT_TOLERANCE);
    }
}
