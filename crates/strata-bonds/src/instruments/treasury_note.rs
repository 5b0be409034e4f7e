//! US Treasury note conventions.

use serde::{Deserialize, Serialize};

use strata_core::Frequency;
use strata_math::solvers::SolverConfig;

use crate::cashflows::CashflowSchedule;
use crate::error::{BondError, BondResult};
use crate::instruments::coupon_bond::whole_periods;
use crate::instruments::{CouponBond, Instrument, InstrumentKind, Periods};

/// Face value of a Treasury note quote.
const NOTE_FACE_VALUE: f64 = 100.0;

/// Treasury notes pay semi-annually.
const NOTE_FREQUENCY: Frequency = Frequency::SemiAnnual;

/// Converts an annual yield quoted on a Treasury-note basis to the
/// per-period (semi-annual) yield.
#[must_use]
pub fn period_ytm(annual_ytm: f64) -> f64 {
    annual_ytm / f64::from(NOTE_FREQUENCY.periods_per_year())
}

/// A US Treasury note: face 100, semi-annual coupons of `100 * rate / 2`,
/// `2 * maturity` periods.
///
/// # Example
///
/// ```rust
/// use strata_bonds::prelude::*;
///
/// let note = TreasuryNote::new(0.0475, 9.5, 0.037548).unwrap();
/// assert!((note.price() - 107.8906).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreasuryNote {
    inner: CouponBond,
    coupon_rate: f64,
    maturity_years: f64,
}

impl TreasuryNote {
    /// Creates a note from its annual coupon rate, years to maturity and
    /// annual yield.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::Construction`] unless `maturity_years` spans a
    /// whole number of semi-annual periods.
    pub fn new(coupon_rate: f64, maturity_years: f64, annual_ytm: f64) -> BondResult<Self> {
        let periods = Self::periods_for(maturity_years)?;
        let inner = CouponBond::new(
            NOTE_FACE_VALUE,
            Self::coupon_for(coupon_rate),
            periods,
            period_ytm(annual_ytm),
        )?;
        Ok(Self {
            inner,
            coupon_rate,
            maturity_years,
        })
    }

    /// Creates a note by solving for the yield that reprices it to `price`.
    pub fn from_price(
        price: f64,
        coupon_rate: f64,
        maturity_years: f64,
        config: &SolverConfig,
    ) -> BondResult<Self> {
        let periods = Self::periods_for(maturity_years)?;
        let inner = CouponBond::from_price(
            price,
            NOTE_FACE_VALUE,
            Self::coupon_for(coupon_rate),
            periods,
            config,
        )?;
        Ok(Self {
            inner,
            coupon_rate,
            maturity_years,
        })
    }

    fn periods_for(maturity_years: f64) -> BondResult<u32> {
        let raw = maturity_years * f64::from(NOTE_FREQUENCY.periods_per_year());
        let rounded = raw.round();
        if (raw - rounded).abs() > 1e-9 {
            return Err(BondError::construction(format!(
                "Treasury note maturity must be a multiple of half a year, got {maturity_years}"
            )));
        }
        whole_periods(rounded)
    }

    fn coupon_for(coupon_rate: f64) -> f64 {
        NOTE_FACE_VALUE * period_ytm(coupon_rate)
    }

    /// Annual coupon rate.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Years to maturity.
    #[must_use]
    pub fn maturity_years(&self) -> f64 {
        self.maturity_years
    }

    /// Annualised yield (twice the per-period yield).
    #[must_use]
    pub fn annual_ytm(&self) -> f64 {
        self.inner.ytm() * f64::from(NOTE_FREQUENCY.periods_per_year())
    }

    /// Macaulay duration in years.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.macaulay_duration() * NOTE_FREQUENCY.period_length()
    }

    /// The underlying coupon bond.
    #[must_use]
    pub fn as_coupon_bond(&self) -> &CouponBond {
        &self.inner
    }
}

impl Instrument for TreasuryNote {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::TreasuryNote
    }

    fn face_value(&self) -> f64 {
        self.inner.face_value()
    }

    fn coupon(&self) -> f64 {
        self.inner.coupon()
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
        self.inner.macaulay_duration()
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
    fn test_price() {
        let note = TreasuryNote::new(0.0475, 9.5, 0.037548).unwrap();
        assert_relative_eq!(note.price(), 107.8906, epsilon = 1e-3);
        assert_eq!(note.periods(), Periods::Finite(19));
        assert_relative_eq!(note.coupon(), 2.375);
    }

    #[test]
    fn test_from_price() {
        let note =
            TreasuryNote::from_price(141.5267, 0.08875, 9.5, &SolverConfig::default()).unwrap();
        assert_relative_eq!(note.ytm(), period_ytm(0.036603), epsilon = 1e-6);
    }

    #[test]
    fn test_duration_in_years() {
        let note =
            TreasuryNote::from_price(111.703125, 0.04, 5.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(note.ytm(), 0.0077896424, epsilon = 1e-9);
        assert_relative_eq!(note.duration(), 4.6040133, epsilon = 5e-3);
        assert_relative_eq!(note.duration(), note.macaulay_duration() / 2.0);
    }

    #[test]
    fn test_zero_maturity_note() {
        let note = TreasuryNote::new(0.05, 0.0, 0.02).unwrap();
        assert_eq!(note.periods(), Periods::Finite(0));
    }

    #[test]
    fn test_fractional_periods_rejected() {
        assert!(matches!(
            TreasuryNote::new(0.05, 1.3, 0.02),
            Err(BondError::Construction { .. })
        ));
        assert!(TreasuryNote::new(0.05, -0.5, 0.02).is_err());
    }

    #[test]
    fn test_period_ytm() {
        assert_relative_eq!(period_ytm(0.1), 0.05);
    }
}
