//! Sequential calibration of a short-rate tree to a zero-coupon curve.
//!
//! Period by period, the drift `θ_j` of the new rate column is chosen so
//! that the tree reprices the zero maturing at step `j + 1`; earlier
//! columns stay frozen. Each `θ_j` minimizes the squared pricing error by
//! golden-section bracketing followed by Brent's method. A period that
//! cannot be fitted exactly keeps its best `θ_j` and the residual is
//! recorded.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use strata_curves::DiscountCurve;
use strata_math::optimization::{minimize_scalar, OptimizationConfig};

use crate::error::{LatticeError, LatticeResult};
use crate::models::ShortRateModel;
use crate::pricing::TreePricer;
use crate::tree::{backfill, RateTree, ZeroTree};

/// Settings for tree calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibratorConfig {
    /// Length of one tree step in years.
    pub time_step: f64,
    /// Squared pricing error above which a period is reported as a poor
    /// fit.
    pub tolerance: f64,
    /// Drift at which each period's search starts.
    pub initial_theta: f64,
    /// Width of the first bracketing step.
    pub initial_step: f64,
    /// Settings for the one-dimensional minimizer.
    pub optimizer: OptimizationConfig,
}

impl Default for CalibratorConfig {
    fn default() -> Self {
        Self {
            time_step: 0.5,
            tolerance: 1e-14,
            initial_theta: 0.0,
            initial_step: 1.0,
            optimizer: OptimizationConfig::default(),
        }
    }
}

impl CalibratorConfig {
    /// Creates a configuration for the given time step.
    #[must_use]
    pub fn new(time_step: f64) -> Self {
        Self {
            time_step,
            ..Self::default()
        }
    }

    /// Sets the residual tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the starting drift.
    #[must_use]
    pub fn with_initial_theta(mut self, initial_theta: f64) -> Self {
        self.initial_theta = initial_theta;
        self
    }

    /// Sets the minimizer settings.
    #[must_use]
    pub fn with_optimizer(mut self, optimizer: OptimizationConfig) -> Self {
        self.optimizer = optimizer;
        self
    }
}

/// A calibrated tree together with its fit diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibratedTree {
    /// Model name.
    pub model: String,
    /// Model volatility.
    pub volatility: f64,
    /// Length of one step in years.
    pub time_step: f64,
    /// Target zero prices, maturing at steps `1..=n`.
    pub targets: Vec<f64>,
    /// Fitted drift for periods `1..n`; entry `k` belongs to period `k + 1`.
    pub thetas: Vec<f64>,
    /// Squared pricing error for periods `1..n`, aligned with `thetas`.
    pub errors: Vec<f64>,
    /// Zero prices implied by the tree, aligned with `targets`.
    pub fitted_zeros: Vec<f64>,
    /// Short rates; column `j` spans `[j dt, (j + 1) dt]`.
    pub rates: RateTree,
    /// Zero-coupon trees by maturity; entry `k` matures at step `k + 1`.
    pub zero_trees: Vec<ZeroTree>,
}

impl CalibratedTree {
    /// Number of calibrated periods (including the initial rate).
    #[must_use]
    pub fn periods(&self) -> usize {
        self.targets.len()
    }

    /// Sum of squared per-period errors.
    #[must_use]
    pub fn total_error(&self) -> f64 {
        self.errors.iter().sum()
    }

    /// Largest squared per-period error.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.errors.iter().copied().fold(0.0, f64::max)
    }

    /// Mean absolute difference between target and fitted zero prices.
    #[must_use]
    pub fn mean_absolute_error(&self) -> f64 {
        if self.targets.is_empty() {
            return 0.0;
        }
        let sum: f64 = self
            .targets
            .iter()
            .zip(&self.fitted_zeros)
            .map(|(target, fitted)| (target - fitted).abs())
            .sum();
        sum / self.targets.len() as f64
    }

    /// Backward-induction pricer over the calibrated rates.
    #[must_use]
    pub fn pricer(&self) -> TreePricer<'_> {
        TreePricer::new(&self.rates, self.time_step)
    }

    /// Periods whose squared error exceeds `tolerance`.
    #[must_use]
    pub fn poorly_fitted(&self, tolerance: f64) -> Vec<usize> {
        self.errors
            .iter()
            .zip(1..)
            .filter(|&(&error, _)| error > tolerance)
            .map(|(_, period)| period)
            .collect()
    }
}

/// Calibrates short-rate trees to zero curves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeCalibrator {
    /// Calibration settings.
    pub config: CalibratorConfig,
}

impl TreeCalibrator {
    /// Creates a calibrator.
    #[must_use]
    pub fn new(config: CalibratorConfig) -> Self {
        Self { config }
    }

    /// Calibrates `model` to zero prices maturing at `dt, 2 dt, ..., n dt`.
    ///
    /// The initial short rate is `-ln(Z_1) / dt`; each later period solves
    /// for its drift with all earlier columns held fixed.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::InvalidInput`] for an empty curve, a
    /// non-positive zero price or time step, and
    /// [`LatticeError::NoConvergence`] if a period's minimum cannot be
    /// bracketed.
    pub fn calibrate(&self, model: &dyn ShortRateModel, zeros: &[f64]) -> LatticeResult<CalibratedTree> {
        let dt = self.config.time_step;
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(LatticeError::invalid_input(format!(
                "time step must be positive, got {dt}"
            )));
        }
        let Some(&first) = zeros.first() else {
            return Err(LatticeError::invalid_input("no target zero prices"));
        };
        if let Some(bad) = zeros.iter().find(|z| !(**z > 0.0) || !z.is_finite()) {
            return Err(LatticeError::invalid_input(format!(
                "zero prices must be positive, got {bad}"
            )));
        }

        let r0 = -first.ln() / dt;
        let mut rates = RateTree::with_root(r0);
        let mut zero_trees = vec![backfill(&rates, 0, dt)];
        let mut thetas = Vec::with_capacity(zeros.len().saturating_sub(1));
        let mut errors = Vec::with_capacity(zeros.len().saturating_sub(1));
        let mut fitted_zeros = vec![zero_trees[0].root()];

        for (period, &target) in zeros.iter().enumerate().skip(1) {
            rates.grow();

            let objective = |theta: f64| {
                let mut trial = rates.clone();
                model.fill_column(&mut trial, period, theta, dt);
                (target - backfill(&trial, period, dt).root()).powi(2)
            };
            let minimum = minimize_scalar(
                objective,
                self.config.initial_theta,
                self.config.initial_step,
                &self.config.optimizer,
            )
            .map_err(|err| match err {
                strata_math::MathError::ConvergenceFailed {
                    iterations,
                    residual,
                } => LatticeError::NoConvergence {
                    period,
                    iterations,
                    residual,
                },
                other => other.into(),
            })?;

            model.fill_column(&mut rates, period, minimum.x, dt);
            let zero_tree = backfill(&rates, period, dt);
            let fitted = zero_tree.root();
            let error = (target - fitted).powi(2);

            if error > self.config.tolerance {
                warn!(
                    model = model.name(),
                    period,
                    theta = minimum.x,
                    error,
                    tolerance = self.config.tolerance,
                    "tree period fitted above tolerance"
                );
            } else {
                debug!(
                    model = model.name(),
                    period,
                    theta = minimum.x,
                    error,
                    iterations = minimum.iterations,
                    "tree period calibrated"
                );
            }

            thetas.push(minimum.x);
            errors.push(error);
            fitted_zeros.push(fitted);
            zero_trees.push(zero_tree);
        }

        Ok(CalibratedTree {
            model: model.name().to_string(),
            volatility: model.volatility(),
            time_step: dt,
            targets: zeros.to_vec(),
            thetas,
            errors,
            fitted_zeros,
            rates,
            zero_trees,
        })
    }

    /// Calibrates to `periods` zero prices sampled from a discount curve
    /// at `dt, 2 dt, ...`.
    pub fn calibrate_to_curve(
        &self,
        model: &dyn ShortRateModel,
        curve: &DiscountCurve,
        periods: usize,
    ) -> LatticeResult<CalibratedTree> {
        let zeros = curve.sample(self.config.time_step, periods)?;
        self.calibrate(model, &zeros)
    }

    /// Runs independent calibrations in parallel, one per zero curve.
    ///
    /// Results are returned in input order.
    pub fn calibrate_batch(
        &self,
        model: &dyn ShortRateModel,
        curves: &[Vec<f64>],
    ) -> Vec<LatticeResult<CalibratedTree>> {
        curves
            .par_iter()
            .map(|zeros| self.calibrate(model, zeros))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BlackDermanToy, HoLee};
    use approx::assert_relative_eq;

    const R0: f64 = 0.050682155;

    fn declining_curve(periods: usize) -> Vec<f64> {
        (0..periods)
            .map(|k| {
                let t = (k + 1) as f64 * 0.5;
                (-(0.05 - 0.002 * k as f64) * t).exp()
            })
            .collect()
    }

    #[test]
    fn test_ho_lee_recovers_known_theta() {
        let zeros = [(-R0 * 0.5).exp(), 0.96792141];
        let tree = TreeCalibrator::default()
            .calibrate(&HoLee::new(0.00671631656750658), &zeros)
            .unwrap();

        assert_relative_eq!(tree.rates.root(), R0, epsilon = 1e-15);
        assert_eq!(tree.thetas.len(), 1);
        assert_relative_eq!(tree.thetas[0], -0.072299819, epsilon = 1e-6);
        assert_relative_eq!(tree.fitted_zeros[1], 0.96792141, epsilon = 1e-9);
    }

    #[test]
    fn test_bdt_recovers_known_theta() {
        let zeros = [(-R0 * 0.5).exp(), 0.95144404];
        let tree = TreeCalibrator::default()
            .calibrate(&BlackDermanToy::new(0.22225391407878499), &zeros)
            .unwrap();

        assert_relative_eq!(tree.thetas[0], -0.0969608599011977, epsilon = 1e-6);
        assert_relative_eq!(tree.rates.get(0, 1), 0.05650057, epsilon = 1e-7);
        assert_relative_eq!(tree.rates.get(1, 1), 0.04126176, epsilon = 1e-7);
    }

    #[test]
    fn test_ho_lee_round_trip() {
        let zeros = declining_curve(20);
        let tree = TreeCalibrator::default().calibrate(&HoLee::new(0.01), &zeros).unwrap();

        assert_eq!(tree.periods(), 20);
        assert_eq!(tree.thetas.len(), 19);
        assert_eq!(tree.rates.columns(), 20);
        assert_eq!(tree.zero_trees.len(), 20);
        assert!(tree.mean_absolute_error() < 1e-7);
        assert!(tree.poorly_fitted(1e-14).is_empty());

        for (k, zero_tree) in tree.zero_trees.iter().enumerate() {
            assert_eq!(zero_tree.columns(), k + 2);
            assert_relative_eq!(zero_tree.root(), zeros[k], epsilon = 1e-7);
        }
    }

    #[test]
    fn test_prior_columns_are_frozen() {
        let zeros = declining_curve(6);
        let calibrator = TreeCalibrator::default();
        let short = calibrator.calibrate(&HoLee::new(0.01), &zeros[..4]).unwrap();
        let long = calibrator.calibrate(&HoLee::new(0.01), &zeros).unwrap();

        assert_eq!(&long.thetas[..3], &short.thetas[..]);
        for j in 0..4 {
            assert_eq!(long.rates.column(j), short.rates.column(j));
        }
    }

    #[test]
    fn test_unattainable_target_is_best_effort() {
        // Strongly negative forwards cannot be reached with positive BDT
        // rates; the fit degrades but still returns every period.
        let zeros: Vec<f64> = (0..20)
            .map(|k| {
                let t = (k + 1) as f64 * 0.5;
                (-(0.05 - 0.004 * k as f64) * t).exp()
            })
            .collect();
        let tree = TreeCalibrator::default()
            .calibrate(&BlackDermanToy::new(0.2), &zeros)
            .unwrap();

        assert_eq!(tree.thetas.len(), 19);
        assert!(tree.max_error() > 1e-10);
        assert!(!tree.poorly_fitted(1e-14).is_empty());
        assert!(tree.total_error() >= tree.max_error());
    }

    #[test]
    fn test_calibrate_to_curve() {
        let zeros = declining_curve(8);
        let curve = DiscountCurve::from_zeros(&zeros, 0.5).unwrap();
        let calibrator = TreeCalibrator::default();

        let from_curve = calibrator
            .calibrate_to_curve(&HoLee::new(0.01), &curve, 8)
            .unwrap();
        let direct = calibrator.calibrate(&HoLee::new(0.01), &zeros).unwrap();
        assert_eq!(from_curve, direct);

        assert!(calibrator
            .calibrate_to_curve(&HoLee::new(0.01), &curve, 9)
            .is_err());
    }

    #[test]
    fn test_batch_matches_sequential() {
        let curves = vec![declining_curve(6), declining_curve(10), vec![]];
        let calibrator = TreeCalibrator::default();
        let model = HoLee::new(0.01);

        let batch = calibrator.calibrate_batch(&model, &curves);
        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch[0].as_ref().unwrap(),
            &calibrator.calibrate(&model, &curves[0]).unwrap()
        );
        assert_eq!(batch[1].as_ref().unwrap().periods(), 10);
        assert!(batch[2].is_err());
    }

    #[test]
    fn test_invalid_inputs() {
        let calibrator = TreeCalibrator::default();
        let model = HoLee::new(0.01);
        assert!(calibrator.calibrate(&model, &[]).is_err());
        assert!(calibrator.calibrate(&model, &[0.98, -0.9]).is_err());
        assert!(TreeCalibrator::new(CalibratorConfig::new(0.0))
            .calibrate(&model, &[0.98])
            .is_err());
    }
}
