//! Optimization algorithms.
//!
//! - [`nelder_mead`]: Derivative-free simplex search over `R^n`, used for
//!   parametric curve fitting
//! - [`minimize_scalar`]: Golden-section bracketing followed by Brent's
//!   parabolic minimization, used for per-period tree calibration

mod nelder_mead;
mod scalar;

pub use nelder_mead::nelder_mead;
pub use scalar::{bracket_minimum, brent_minimize, minimize_scalar, Bracket, ScalarMinimum};

use serde::{Deserialize, Serialize};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    /// Convergence tolerance on the objective (simplex spread, or the
    /// relative abscissa tolerance for scalar minimization).
    pub tolerance: f64,
    /// Convergence tolerance on the parameters (simplex diameter).
    pub parameter_tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Relative size of the initial simplex edges.
    pub initial_step: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            parameter_tolerance: 1e-8,
            max_iterations: 5000,
            initial_step: 0.05,
        }
    }
}

impl OptimizationConfig {
    /// Sets the objective tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the parameter tolerance.
    #[must_use]
    pub fn with_parameter_tolerance(mut self, parameter_tolerance: f64) -> Self {
        self.parameter_tolerance = parameter_tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the relative initial simplex step.
    #[must_use]
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }
}

/// Result of a multi-dimensional optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Number of objective evaluations.
    pub evaluations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}
