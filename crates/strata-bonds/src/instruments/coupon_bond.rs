//! Fixed coupon bullet bond.

use serde::{Deserialize, Serialize};

use strata_math::solvers::SolverConfig;

use crate::cashflows::CashflowSchedule;
use crate::error::{BondError, BondResult};
use crate::instruments::{Instrument, InstrumentKind, Periods};
use crate::pricing::{price_from_yield, yield_to_maturity};
use crate::risk;

/// A bond paying a fixed coupon each period and its face value at the final
/// period.
///
/// # Example
///
/// ```rust
/// use strata_bonds::prelude::*;
/// use strata_math::solvers::SolverConfig;
///
/// let bond = CouponBond::from_price(100.0, 100.0, 6.5, 8, &SolverConfig::default()).unwrap();
/// assert!((bond.ytm() - 0.065).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CouponBond {
    face_value: f64,
    coupon: f64,
    periods: u32,
    ytm: f64,
}

impl CouponBond {
    /// Creates a coupon bond from its yield.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::Construction`] if an amount is not finite or the
    /// yield is not above -100%.
    pub fn new(face_value: f64, coupon: f64, periods: u32, ytm: f64) -> BondResult<Self> {
        if !face_value.is_finite() || !coupon.is_finite() {
            return Err(BondError::construction(format!(
                "face value and coupon must be finite, got {face_value} and {coupon}"
            )));
        }
        if !(ytm > -1.0) || !ytm.is_finite() {
            return Err(BondError::construction(format!(
                "yield must be finite and above -1, got {ytm}"
            )));
        }
        Ok(Self {
            face_value,
            coupon,
            periods,
            ytm,
        })
    }

    /// Creates a coupon bond from a raw period count.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::Construction`] unless `periods` is a
    /// non-negative whole number.
    pub fn try_from_periods(face_value: f64, coupon: f64, periods: f64, ytm: f64) -> BondResult<Self> {
        Self::new(face_value, coupon, whole_periods(periods)?, ytm)
    }

    /// Creates a coupon bond by solving for the yield that reprices it to
    /// `price`.
    ///
    /// # Errors
    ///
    /// Propagates [`BondError::NoConvergence`] from the yield solve.
    pub fn from_price(
        price: f64,
        face_value: f64,
        coupon: f64,
        periods: u32,
        config: &SolverConfig,
    ) -> BondResult<Self> {
        let ytm = yield_to_maturity(price, face_value, coupon, periods, config)?;
        Self::new(face_value, coupon, periods, ytm)
    }

    /// Number of remaining periods.
    #[must_use]
    pub fn period_count(&self) -> u32 {
        self.periods
    }

    /// Returns a copy repriced at a different yield.
    pub fn with_ytm(&self, ytm: f64) -> BondResult<Self> {
        Self::new(self.face_value, self.coupon, self.periods, ytm)
    }

    /// Cash-flow schedule; infallible for a finite bullet bond.
    #[must_use]
    pub fn schedule(&self) -> CashflowSchedule {
        CashflowSchedule::bullet(self.face_value, self.coupon, self.periods)
    }
}

/// Validates a raw period count.
pub(crate) fn whole_periods(periods: f64) -> BondResult<u32> {
    if !periods.is_finite() || periods < 0.0 || periods.fract() != 0.0 || periods > f64::from(u32::MAX) {
        return Err(BondError::construction(format!(
            "periods must be a non-negative integer, got {periods}"
        )));
    }
    Ok(periods as u32)
}

impl Instrument for CouponBond {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::CouponBond
    }

    fn face_value(&self) -> f64 {
        self.face_value
    }

    fn coupon(&self) -> f64 {
        self.coupon
    }

    fn periods(&self) -> Periods {
        Periods::Finite(self.periods)
    }

    fn ytm(&self) -> f64 {
        self.ytm
    }

    fn price(&self) -> f64 {
        price_from_yield(self.face_value, self.coupon, self.periods, self.ytm)
    }

    fn cashflows(&self) -> BondResult<CashflowSchedule> {
        Ok(self.schedule())
    }

    fn macaulay_duration(&self) -> f64 {
        risk::macaulay_duration(&self.schedule(), self.ytm, self.price())
    }

    fn convexity(&self) -> f64 {
        risk::yield_convexity(&self.schedule(), self.ytm, self.price())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn textbook_bond() -> CouponBond {
        CouponBond::new(100.0, 7.0, 10, 0.07).unwrap()
    }

    #[test]
    fn test_price_equals_par_when_coupon_equals_ytm() {
        let bond = CouponBond::new(100.0, 7.0, 12, 0.07).unwrap();
        assert_relative_eq!(bond.price(), 100.0, epsilon = 1e-10);
    }

    #[test]
    fn test_non_integer_periods_rejected() {
        let result = CouponBond::try_from_periods(100.0, 5.0, 2.5, 0.03);
        assert!(matches!(result, Err(BondError::Construction { .. })));
        assert!(CouponBond::try_from_periods(100.0, 5.0, -1.0, 0.03).is_err());
        assert!(CouponBond::try_from_periods(100.0, 5.0, 4.0, 0.03).is_ok());
    }

    #[test]
    fn test_yield_domain() {
        assert!(CouponBond::new(100.0, 5.0, 4, -1.0).is_err());
        assert!(CouponBond::new(100.0, 5.0, 4, f64::NAN).is_err());
        assert!(CouponBond::new(100.0, 5.0, 4, -0.5).is_ok());
    }

    #[test]
    fn test_from_price_round_trip() {
        let expected = CouponBond::new(100.0, 6.5, 8, 0.065).unwrap();
        let actual = CouponBond::from_price(100.0, 100.0, 6.5, 8, &SolverConfig::default()).unwrap();
        assert_relative_eq!(actual.ytm(), expected.ytm(), epsilon = 1e-10);
        assert_eq!(actual.period_count(), 8);
    }

    #[test]
    fn test_cashflow_iteration_is_restartable() {
        let bond = CouponBond::new(100.0, 7.0, 2, 0.01).unwrap();
        let first: Vec<(u32, f64)> = bond
            .cashflows()
            .unwrap()
            .into_iter()
            .map(|cf| (cf.period, cf.amount))
            .collect();
        let second: Vec<(u32, f64)> = bond
            .cashflows()
            .unwrap()
            .into_iter()
            .map(|cf| (cf.period, cf.amount))
            .collect();
        assert_eq!(first, vec![(1, 7.0), (2, 107.0)]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_macaulay_duration() {
        assert_relative_eq!(textbook_bond().macaulay_duration(), 7.51523225, epsilon = 1e-8);
    }

    #[test]
    fn test_ytm_convexity() {
        assert_relative_eq!(textbook_bond().convexity(), 64.9329593, epsilon = 1e-7);
    }

    #[test]
    fn test_price_change_without_convexity() {
        assert_relative_eq!(
            textbook_bond().price_change(0.01, false),
            -7.02358154,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_price_change_with_convexity() {
        assert_relative_eq!(
            textbook_bond().price_change(0.01, true),
            -6.69891674,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_zero_periods_prices_at_face() {
        let bond = CouponBond::new(100.0, 5.0, 0, 0.04).unwrap();
        assert_relative_eq!(bond.price(), 100.0);
        assert!(bond.cashflows().unwrap().is_empty());
    }
}
