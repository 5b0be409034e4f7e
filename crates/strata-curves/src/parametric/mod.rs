//! Parametric yield-curve models and least-squares fitting.
//!
//! - [`NelsonSiegel`]: level, slope and curvature with a single decay
//! - [`Vasicek`]: the affine yield curve of a mean-reverting short rate
//!
//! Both models map a maturity in years to a continuously compounded yield;
//! discount factors follow as `exp(-m y(m))`. [`CurveFitter`] calibrates
//! either model to bond prices.

mod fitter;
mod nelson_siegel;
mod vasicek;

pub use fitter::{pricing_error, CurveFitter, FitQuote, FitResult};
pub use nelson_siegel::NelsonSiegel;
pub use vasicek::Vasicek;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CurveError, CurveResult};

/// A yield curve given in closed form by a fixed parameter vector.
pub trait ParametricModel: fmt::Debug + Sized + Send + Sync {
    /// Number of parameters.
    const PARAMETER_COUNT: usize;

    /// Builds the model from a parameter vector.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] if the slice has the wrong
    /// length.
    fn from_parameters(parameters: &[f64]) -> CurveResult<Self>;

    /// The parameter vector, in the order accepted by
    /// [`from_parameters`](Self::from_parameters).
    fn parameters(&self) -> Vec<f64>;

    /// Default starting point for a fit.
    fn default_guess() -> Vec<f64>;

    /// Continuously compounded yield at maturity `m` years.
    fn yield_at(&self, maturity: f64) -> f64;

    /// Discount factor at maturity `m` years.
    fn discount_factor(&self, maturity: f64) -> f64 {
        (-maturity * self.yield_at(maturity)).exp()
    }
}

/// Which parametric model to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Nelson-Siegel.
    NelsonSiegel,
    /// Vasicek.
    Vasicek,
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::NelsonSiegel => write!(f, "Nelson-Siegel"),
            ModelKind::Vasicek => write!(f, "Vasicek"),
        }
    }
}

/// `1/m`, taken as zero at `m = 0` so the models stay finite at the origin.
pub(crate) fn inverse_maturity(maturity: f64) -> f64 {
    if maturity == 0.0 {
        0.0
    } else {
        1.0 / maturity
    }
}

pub(crate) fn check_parameter_count(model: &str, expected: usize, parameters: &[f64]) -> CurveResult<()> {
    if parameters.len() == expected {
        Ok(())
    } else {
        Err(CurveError::invalid_input(format!(
            "{model} takes {expected} parameters, got {}",
            parameters.len()
        )))
    }
}
