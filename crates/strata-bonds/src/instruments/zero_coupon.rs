//! Zero-coupon bond.

use serde::{Deserialize, Serialize};

use crate::cashflows::CashflowSchedule;
use crate::error::{BondError, BondResult};
use crate::instruments::{CouponBond, Instrument, InstrumentKind, Periods};

/// A bond paying only its face value at maturity.
///
/// Wraps a [`CouponBond`] with a zero coupon. Its Macaulay duration is
/// exactly its period count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZeroCouponBond {
    inner: CouponBond,
}

impl ZeroCouponBond {
    /// Creates a zero-coupon bond from its yield.
    pub fn new(face_value: f64, periods: u32, ytm: f64) -> BondResult<Self> {
        Ok(Self {
            inner: CouponBond::new(face_value, 0.0, periods, ytm)?,
        })
    }

    /// Creates a zero-coupon bond from its price using the closed-form
    /// yield `(F / P)^(1/n) - 1`.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::Construction`] for non-positive prices or face
    /// values, or zero periods.
    pub fn from_price(price: f64, face_value: f64, periods: u32) -> BondResult<Self> {
        if !(price > 0.0) || !(face_value > 0.0) {
            return Err(BondError::construction(format!(
                "zero-coupon price and face value must be positive, got {price} and {face_value}"
            )));
        }
        if periods == 0 {
            return Err(BondError::construction(
                "zero-coupon yield is undefined with no remaining periods",
            ));
        }
        let ytm = (face_value / price).powf(1.0 / f64::from(periods)) - 1.0;
        Self::new(face_value, periods, ytm)
    }

    /// Creates a unit-face zero from a discount factor.
    pub fn from_discount_factor(discount_factor: f64, periods: u32) -> BondResult<Self> {
        Self::from_price(discount_factor, 1.0, periods)
    }

    /// Number of remaining periods.
    #[must_use]
    pub fn period_count(&self) -> u32 {
        self.inner.period_count()
    }

    /// Price per unit of face value.
    #[must_use]
    pub fn discount_factor(&self) -> f64 {
        self.price() / self.face_value()
    }
}

impl Instrument for ZeroCouponBond {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::ZeroCouponBond
    }

    fn face_value(&self) -> f64 {
        self.inner.face_value()
    }

    fn coupon(&self) -> f64 {
        0.0
    }

    fn periods(&self) -> Periods {
        self.inner.periods()
    }

    fn ytm(&self) -> f64 {
        self.inner.ytm()
    }

    fn price(&self) -> f64 {
        self.inner.price()
    }

    fn cashflows(&self) -> BondResult<CashflowSchedule> {
        self.inner.cashflows()
    }

    fn macaulay_duration(&self) -> f64 {
        f64::from(self.period_count())
    }

    fn convexity(&self) -> f64 {
        self.inner.convexity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_duration_equals_periods() {
        let zero = ZeroCouponBond::new(100.0, 7, 0.05).unwrap();
        assert_eq!(zero.macaulay_duration(), 7.0);

        let unit = ZeroCouponBond::new(1.0, 5, 0.05).unwrap();
        assert_eq!(unit.macaulay_duration(), 5.0);
    }

    #[test]
    fn test_from_price() {
        let zero = ZeroCouponBond::from_price(1.05_f64.powi(-4), 1.0, 4).unwrap();
        assert_relative_eq!(zero.ytm(), 0.05, epsilon = 1e-14);
        assert_relative_eq!(zero.discount_factor(), 1.05_f64.powi(-4), epsilon = 1e-14);
    }

    #[test]
    fn test_convexity() {
        let zero = ZeroCouponBond::new(100.0, 4, 0.05).unwrap();
        assert_relative_eq!(zero.convexity(), 20.0 / 1.05_f64.powi(2), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_price() {
        assert!(ZeroCouponBond::from_price(0.0, 1.0, 3).is_err());
        assert!(ZeroCouponBond::from_price(0.9, 1.0, 0).is_err());
    }
}
