//! Nelson-Siegel yield curve.

use serde::{Deserialize, Serialize};

use super::{check_parameter_count, inverse_maturity, ParametricModel};
use crate::error::CurveResult;

/// Nelson-Siegel curve:
///
/// `y(m) = θ0 + (θ1 + θ2)(1 - e^{-m/κ}) κ/m - θ2 e^{-m/κ}`
///
/// `θ0` is the long-run level, `θ1` the slope and `θ2` the curvature;
/// `κ` sets the maturity at which the hump peaks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NelsonSiegel {
    /// Level.
    pub theta_0: f64,
    /// Slope.
    pub theta_1: f64,
    /// Curvature.
    pub theta_2: f64,
    /// Decay scale in years.
    pub kappa: f64,
}

impl NelsonSiegel {
    /// Creates a Nelson-Siegel curve.
    #[must_use]
    pub fn new(theta_0: f64, theta_1: f64, theta_2: f64, kappa: f64) -> Self {
        Self {
            theta_0,
            theta_1,
            theta_2,
            kappa,
        }
    }
}

impl ParametricModel for NelsonSiegel {
    const PARAMETER_COUNT: usize = 4;

    fn from_parameters(parameters: &[f64]) -> CurveResult<Self> {
        check_parameter_count("Nelson-Siegel", Self::PARAMETER_COUNT, parameters)?;
        Ok(Self::new(
            parameters[0],
            parameters[1],
            parameters[2],
            parameters[3],
        ))
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.theta_0, self.theta_1, self.theta_2, self.kappa]
    }

    fn default_guess() -> Vec<f64> {
        vec![0.0, 0.0, 0.0, 1.0]
    }

    fn yield_at(&self, maturity: f64) -> f64 {
        let decay = (-maturity / self.kappa).exp();
        self.theta_0
            + (self.theta_1 + self.theta_2) * (1.0 - decay) * inverse_maturity(maturity) * self.kappa
            - self.theta_2 * decay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_finite_at_zero_maturity() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.01, 1.5);
        let y0 = ns.yield_at(0.0);
        assert!(y0.is_finite());
        assert_relative_eq!(y0, 0.05 - 0.01, epsilon = 1e-15);
        assert_eq!(ns.discount_factor(0.0), 1.0);
    }

    #[test]
    fn test_long_end_tends_to_level() {
        let ns = NelsonSiegel::new(0.05, -0.02, 0.01, 1.5);
        assert_relative_eq!(ns.yield_at(1000.0), 0.05, epsilon = 1e-4);
    }

    #[test]
    fn test_known_value() {
        let ns = NelsonSiegel::new(0.04, -0.02, 0.03, 2.0);
        let m = 2.0;
        let decay = (-1.0_f64).exp();
        let expected = 0.04 + 0.01 * (1.0 - decay) - 0.03 * decay;
        assert_relative_eq!(ns.yield_at(m), expected, epsilon = 1e-15);
        assert_relative_eq!(ns.discount_factor(m), (-m * expected).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_parameter_round_trip() {
        let ns = NelsonSiegel::from_parameters(&[0.04, -0.02, 0.03, 2.0]).unwrap();
        assert_eq!(ns.parameters(), vec![0.04, -0.02, 0.03, 2.0]);
        assert!(NelsonSiegel::from_parameters(&[0.04, 0.0]).is_err());
    }
}
