//! Vasicek affine yield curve.

use serde::{Deserialize, Serialize};

use super::{check_parameter_count, inverse_maturity, ParametricModel};
use crate::error::CurveResult;

/// Below this mean-reversion speed the `γ → 0` limits are used.
const SMALL_GAMMA: f64 = 1e-6;

/// Yield curve implied by a Vasicek short rate:
///
/// `y(m) = (-A(m) + B(m) r0) / m`, with
/// `B = (1 - e^{-γm}) / γ` and
/// `A = (η - σ²/(2γ²))(B - m) - σ²B²/(4γ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vasicek {
    /// Long-run level of the short rate.
    pub eta: f64,
    /// Mean-reversion speed.
    pub gamma: f64,
    /// Current short rate.
    pub r0: f64,
    /// Short-rate volatility.
    pub sigma: f64,
}

impl Vasicek {
    /// Creates a Vasicek curve.
    #[must_use]
    pub fn new(eta: f64, gamma: f64, r0: f64, sigma: f64) -> Self {
        Self {
            eta,
            gamma,
            r0,
            sigma,
        }
    }

    /// The affine coefficients `(A(m), B(m))`.
    #[must_use]
    pub fn coefficients(&self, maturity: f64) -> (f64, f64) {
        let m = maturity;
        let variance = self.sigma * self.sigma;

        if self.gamma.abs() < SMALL_GAMMA {
            return (variance * m.powi(3) / 6.0, m);
        }

        let g = self.gamma;
        let b = -(-g * m).exp_m1() / g;
        let a = (self.eta - variance / (2.0 * g * g)) * (b - m) - variance * b * b / (4.0 * g);
        (a, b)
    }
}

impl ParametricModel for Vasicek {
    const PARAMETER_COUNT: usize = 4;

    fn from_parameters(parameters: &[f64]) -> CurveResult<Self> {
        check_parameter_count("Vasicek", Self::PARAMETER_COUNT, parameters)?;
        Ok(Self::new(
            parameters[0],
            parameters[1],
            parameters[2],
            parameters[3],
        ))
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.eta, self.gamma, self.r0, self.sigma]
    }

    fn default_guess() -> Vec<f64> {
        vec![0.05, 0.5, 0.05, 0.01]
    }

    fn yield_at(&self, maturity: f64) -> f64 {
        let (a, b) = self.coefficients(maturity);
        (-a + b * self.r0) * inverse_maturity(maturity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deterministic_flat_curve() {
        let model = Vasicek::new(0.04, 0.3, 0.04, 0.0);
        for m in [0.5, 1.0, 5.0, 30.0] {
            assert_relative_eq!(model.yield_at(m), 0.04, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_short_end_tends_to_r0() {
        let model = Vasicek::new(0.06, 0.5, 0.02, 0.01);
        assert_relative_eq!(model.yield_at(1e-6), 0.02, epsilon = 1e-7);
    }

    #[test]
    fn test_zero_maturity() {
        let model = Vasicek::new(0.06, 0.5, 0.02, 0.01);
        assert_eq!(model.yield_at(0.0), 0.0);
        assert_eq!(model.discount_factor(0.0), 1.0);
    }

    #[test]
    fn test_small_gamma_limit_is_continuous() {
        let limit = Vasicek::new(0.05, 0.0, 0.03, 0.02);
        let near = Vasicek::new(0.05, 1e-5, 0.03, 0.02);

        let (a, b) = limit.coefficients(10.0);
        assert_relative_eq!(b, 10.0);
        assert_relative_eq!(a, 0.0004 * 1000.0 / 6.0, epsilon = 1e-15);

        for m in [1.0, 5.0, 10.0] {
            assert_relative_eq!(limit.yield_at(m), near.yield_at(m), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_known_value() {
        let model = Vasicek::new(0.05, 0.5, 0.03, 0.02);
        let m = 2.0;
        let b = (1.0 - (-1.0_f64).exp()) / 0.5;
        let a = (0.05 - 0.0004 / 0.5) * (b - m) - 0.0004 * b * b / 2.0;
        assert_relative_eq!(model.yield_at(m), (-a + b * 0.03) / m, epsilon = 1e-15);
    }
}
