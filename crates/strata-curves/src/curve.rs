//! Discount factor curves.
//!
//! A [`DiscountCurve`] is a set of pillars `(tenor, discount factor)` with
//! log-linear interpolation between them. The curve is anchored at
//! `df(0) = 1` and does not extrapolate beyond its last pillar.

use serde::{Deserialize, Serialize};

use strata_core::rates::{spot_rate, ForwardRate};
use strata_core::Compounding;

use crate::error::{CurveError, CurveResult};

/// Tenors within this distance of the last pillar are treated as on it.
const TENOR_EPSILON: f64 = 1e-12;

/// Discount factors by maturity in years.
///
/// # Example
///
/// ```rust
/// use strata_curves::DiscountCurve;
/// use strata_core::Compounding;
///
/// let curve = DiscountCurve::new(vec![0.5, 1.0], vec![0.98, 0.95]).unwrap();
/// assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
/// assert!((curve.discount_factor(1.0).unwrap() - 0.95).abs() < 1e-15);
///
/// let zero = curve.zero_rate(1.0, Compounding::CONTINUOUS).unwrap();
/// assert!((zero + 0.95_f64.ln()).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CurvePillars", into = "CurvePillars")]
pub struct DiscountCurve {
    tenors: Vec<f64>,
    discount_factors: Vec<f64>,
}

impl DiscountCurve {
    /// Creates a curve from pillar tenors and discount factors.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] unless both vectors are non-empty
    /// and of equal length, tenors are finite, positive and strictly
    /// increasing, and discount factors are finite and positive.
    pub fn new(tenors: Vec<f64>, discount_factors: Vec<f64>) -> CurveResult<Self> {
        if tenors.is_empty() {
            return Err(CurveError::invalid_input("curve needs at least one pillar"));
        }
        if tenors.len() != discount_factors.len() {
            return Err(CurveError::invalid_input(format!(
                "{} tenors but {} discount factors",
                tenors.len(),
                discount_factors.len()
            )));
        }

        let mut previous = 0.0;
        for (i, (&t, &df)) in tenors.iter().zip(&discount_factors).enumerate() {
            if !t.is_finite() || t <= previous {
                return Err(CurveError::invalid_input(format!(
                    "tenors must be positive and strictly increasing (index {i}: {t})"
                )));
            }
            if !df.is_finite() || df <= 0.0 {
                return Err(CurveError::invalid_input(format!(
                    "discount factor at tenor {t} must be positive, got {df}"
                )));
            }
            previous = t;
        }

        Ok(Self {
            tenors,
            discount_factors,
        })
    }

    /// Creates a curve from `(tenor, discount factor)` pairs.
    pub fn from_pillars<I>(pillars: I) -> CurveResult<Self>
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (tenors, discount_factors): (Vec<f64>, Vec<f64>) = pillars.into_iter().unzip();
        Self::new(tenors, discount_factors)
    }

    /// Creates a curve from zero prices spaced `time_step` years apart,
    /// the first maturing at `time_step`.
    pub fn from_zeros(zeros: &[f64], time_step: f64) -> CurveResult<Self> {
        if !(time_step > 0.0) || !time_step.is_finite() {
            return Err(CurveError::invalid_input(format!(
                "time step must be positive, got {time_step}"
            )));
        }
        let tenors = (1..=zeros.len()).map(|k| k as f64 * time_step).collect();
        Self::new(tenors, zeros.to_vec())
    }

    /// Pillar tenors in years.
    #[must_use]
    pub fn tenors(&self) -> &[f64] {
        &self.tenors
    }

    /// Pillar discount factors.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.discount_factors
    }

    /// Iterates over `(tenor, discount factor)` pillars.
    pub fn pillars(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.tenors
            .iter()
            .copied()
            .zip(self.discount_factors.iter().copied())
    }

    /// Longest pillar tenor.
    #[must_use]
    pub fn max_tenor(&self) -> f64 {
        self.tenors.last().copied().unwrap_or(0.0)
    }

    /// Discount factor at `t` years, log-linearly interpolated.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::TenorOutOfRange`] for negative tenors or tenors
    /// beyond the last pillar.
    pub fn discount_factor(&self, t: f64) -> CurveResult<f64> {
        let max = self.max_tenor();
        if !(t >= 0.0) || t > max + TENOR_EPSILON {
            return Err(CurveError::tenor_out_of_range(t, 0.0, max));
        }
        if t == 0.0 {
            return Ok(1.0);
        }

        let idx = self.tenors.partition_point(|&x| x < t);
        if idx == self.tenors.len() {
            return Ok(self.discount_factors[idx - 1]);
        }
        let (t1, df1) = (self.tenors[idx], self.discount_factors[idx]);
        if t1 == t {
            return Ok(df1);
        }

        let (t0, df0) = if idx == 0 {
            (0.0, 1.0)
        } else {
            (self.tenors[idx - 1], self.discount_factors[idx - 1])
        };
        let weight = (t - t0) / (t1 - t0);
        Ok((df0.ln() + weight * (df1.ln() - df0.ln())).exp())
    }

    /// Zero rate at `t` years under the given compounding.
    pub fn zero_rate(&self, t: f64, compounding: Compounding) -> CurveResult<f64> {
        let df = self.discount_factor(t)?;
        Ok(spot_rate(df, t, compounding)?)
    }

    /// Forward rate between `t1` and `t2` years.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidInput`] unless `0 <= t1 < t2`, and
    /// [`CurveError::TenorOutOfRange`] if either tenor is off the curve.
    pub fn forward_rate(&self, t1: f64, t2: f64, compounding: Compounding) -> CurveResult<ForwardRate> {
        if !(t1 >= 0.0) || !(t2 > t1) {
            return Err(CurveError::invalid_input(format!(
                "forward rate needs 0 <= t1 < t2, got {t1} and {t2}"
            )));
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        let term = t2 - t1;
        let rate = spot_rate(df2 / df1, term, compounding)?;
        Ok(ForwardRate { term, rate })
    }

    /// Discount factors at `time_step, 2 time_step, ..., periods time_step`.
    pub fn sample(&self, time_step: f64, periods: usize) -> CurveResult<Vec<f64>> {
        if !(time_step > 0.0) {
            return Err(CurveError::invalid_input(format!(
                "time step must be positive, got {time_step}"
            )));
        }
        (1..=periods)
            .map(|k| self.discount_factor(k as f64 * time_step))
            .collect()
    }

    /// Joins two curves at `cutover` years: pillars of `short` up to the
    /// cutover, pillars of `long` beyond it.
    ///
    /// A pillar is placed at the cutover itself using the short curve.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::TenorOutOfRange`] if the short curve does not
    /// reach the cutover.
    pub fn stitch(short: &Self, long: &Self, cutover: f64) -> CurveResult<Self> {
        if !(cutover > 0.0) || !cutover.is_finite() {
            return Err(CurveError::invalid_input(format!(
                "cutover must be positive, got {cutover}"
            )));
        }
        let at_cutover = short.discount_factor(cutover)?;

        let pillars = short
            .pillars()
            .filter(|&(t, _)| t < cutover)
            .chain(std::iter::once((cutover, at_cutover)))
            .chain(long.pillars().filter(|&(t, _)| t > cutover));

        Self::from_pillars(pillars)
    }
}

/// Serialized form of [`DiscountCurve`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CurvePillars {
    tenors: Vec<f64>,
    discount_factors: Vec<f64>,
}

impl TryFrom<CurvePillars> for DiscountCurve {
    type Error = CurveError;

    fn try_from(pillars: CurvePillars) -> Result<Self, Self::Error> {
        Self::new(pillars.tenors, pillars.discount_factors)
    }
}

impl From<DiscountCurve> for CurvePillars {
    fn from(curve: DiscountCurve) -> Self {
        Self {
            tenors: curve.tenors,
            discount_factors: curve.discount_factors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn flat_curve(rate: f64, tenors: &[f64]) -> DiscountCurve {
        DiscountCurve::from_pillars(tenors.iter().map(|&t| (t, (-rate * t).exp()))).unwrap()
    }

    #[test]
    fn test_anchor_and_pillars() {
        let curve = DiscountCurve::new(vec![0.5, 1.0, 2.0], vec![0.98, 0.95, 0.90]).unwrap();
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_eq!(curve.discount_factor(1.0).unwrap(), 0.95);
        assert_eq!(curve.discount_factor(2.0).unwrap(), 0.90);
        assert_relative_eq!(curve.max_tenor(), 2.0);
    }

    #[test]
    fn test_log_linear_interpolation_preserves_flat_rates() {
        let curve = flat_curve(0.04, &[0.5, 1.0, 3.0, 5.0]);
        for t in [0.1, 0.75, 2.2, 4.9] {
            assert_relative_eq!(
                curve.discount_factor(t).unwrap(),
                (-0.04 * t).exp(),
                epsilon = 1e-14
            );
            assert_relative_eq!(
                curve.zero_rate(t, Compounding::CONTINUOUS).unwrap(),
                0.04,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_no_extrapolation() {
        let curve = flat_curve(0.03, &[1.0, 2.0]);
        assert!(matches!(
            curve.discount_factor(2.5),
            Err(CurveError::TenorOutOfRange { .. })
        ));
        assert!(curve.discount_factor(-0.1).is_err());
        assert!(curve.discount_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_forward_rate() {
        let curve = flat_curve(0.05, &[1.0, 2.0, 3.0]);
        let fwd = curve.forward_rate(1.0, 3.0, Compounding::CONTINUOUS).unwrap();
        assert_relative_eq!(fwd.term, 2.0);
        assert_relative_eq!(fwd.rate, 0.05, epsilon = 1e-12);

        assert!(curve.forward_rate(2.0, 1.0, Compounding::ANNUAL).is_err());
    }

    #[test]
    fn test_invalid_pillars() {
        assert!(DiscountCurve::new(vec![], vec![]).is_err());
        assert!(DiscountCurve::new(vec![1.0, 1.0], vec![0.9, 0.8]).is_err());
        assert!(DiscountCurve::new(vec![0.0], vec![1.0]).is_err());
        assert!(DiscountCurve::new(vec![1.0], vec![-0.5]).is_err());
        assert!(DiscountCurve::new(vec![1.0, 2.0], vec![0.9]).is_err());
    }

    #[test]
    fn test_sample_and_from_zeros() {
        let zeros = [0.97, 0.94, 0.91];
        let curve = DiscountCurve::from_zeros(&zeros, 0.5).unwrap();
        assert_eq!(curve.tenors(), &[0.5, 1.0, 1.5]);
        assert_eq!(curve.sample(0.5, 3).unwrap(), zeros.to_vec());
        assert!(curve.sample(0.5, 4).is_err());
    }

    #[test]
    fn test_stitch() {
        let short = flat_curve(0.02, &[0.25, 0.5, 1.0, 2.0]);
        let long = flat_curve(0.05, &[1.0, 5.0, 10.0]);
        let stitched = DiscountCurve::stitch(&short, &long, 1.5).unwrap();

        assert_eq!(stitched.tenors(), &[0.25, 0.5, 1.0, 1.5, 5.0, 10.0]);
        assert_relative_eq!(stitched.discount_factor(1.0).unwrap(), (-0.02_f64).exp());
        assert_relative_eq!(
            stitched.discount_factor(1.5).unwrap(),
            (-0.03_f64).exp(),
            epsilon = 1e-14
        );
        assert_relative_eq!(stitched.discount_factor(10.0).unwrap(), (-0.5_f64).exp());

        assert!(DiscountCurve::stitch(&short, &long, 3.0).is_err());
    }

    #[test]
    fn test_serde_validates() {
        let curve = flat_curve(0.03, &[1.0, 2.0]);
        let json = serde_json::to_string(&curve).unwrap();
        let back: DiscountCurve = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tenors(), curve.tenors());
        for (a, b) in back.discount_factors().iter().zip(curve.discount_factors()) {
            assert_relative_eq!(*a, *b, max_relative = 1e-15);
        }

        let bad = r#"{"tenors":[2.0,1.0],"discount_factors":[0.9,0.95]}"#;
        assert!(serde_json::from_str::<DiscountCurve>(bad).is_err());
    }
}
