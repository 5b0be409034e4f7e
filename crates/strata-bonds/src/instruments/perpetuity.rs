//! Perpetual annuity.

use serde::{Deserialize, Serialize};

use crate::cashflows::CashflowSchedule;
use crate::error::{BondError, BondResult};
use crate::instruments::{Instrument, InstrumentKind, Periods};

/// Pays a fixed coupon every period forever, with no redemption.
///
/// Valuation is closed form: `P = c / y`, `D = (1 + y) / y`, `C = 2 / y^2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perpetuity {
    coupon: f64,
    ytm: f64,
}

impl Perpetuity {
    /// Creates a perpetuity.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::Construction`] unless the yield is strictly
    /// positive and the coupon finite.
    pub fn new(coupon: f64, ytm: f64) -> BondResult<Self> {
        if !(ytm > 0.0) || !ytm.is_finite() {
            return Err(BondError::construction(format!(
                "perpetuity yield must be positive, got {ytm}"
            )));
        }
        if !coupon.is_finite() {
            return Err(BondError::construction(format!(
                "coupon must be finite, got {coupon}"
            )));
        }
        Ok(Self { coupon, ytm })
    }
}

impl Instrument for Perpetuity {
    fn kind(&self) -> InstrumentKind {
        InstrumentKind::Perpetuity
    }

    fn face_value(&self) -> f64 {
        0.0
    }

    fn coupon(&self) -> f64 {
        self.coupon
    }

    fn periods(&self) -> Periods {
        Periods::Perpetual
    }

    fn ytm(&self) -> f64 {
        self.ytm
    }

    fn price(&self) -> f64 {
        self.coupon / self.ytm
    }

    fn cashflows(&self) -> BondResult<CashflowSchedule> {
        Err(BondError::unsupported(
            self.kind().to_string(),
            "cash-flow decomposition",
        ))
    }

    fn macaulay_duration(&self) -> f64 {
        (1.0 + self.ytm) / self.ytm
    }

    fn convexity(&self) -> f64 {
        2.0 / (self.ytm * self.ytm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_price_and_duration() {
        let perpetuity = Perpetuity::new(1.0, 0.07).unwrap();
        assert_relative_eq!(perpetuity.price(), 1.0 / 0.07);
        assert_relative_eq!(perpetuity.macaulay_duration(), 1.07 / 0.07, epsilon = 1e-12);
        assert_relative_eq!(perpetuity.modified_duration(), 1.0 / 0.07, epsilon = 1e-12);
    }

    #[test]
    fn test_convexity() {
        let perpetuity = Perpetuity::new(1.0, 0.07).unwrap();
        assert_relative_eq!(perpetuity.convexity(), 2.0 / 0.0049, epsilon = 1e-9);
    }

    #[test]
    fn test_non_positive_yield_rejected() {
        assert!(matches!(
            Perpetuity::new(1.0, 0.0),
            Err(BondError::Construction { .. })
        ));
        assert!(Perpetuity::new(1.0, -0.01).is_err());
    }

    #[test]
    fn test_cashflows_unsupported() {
        let perpetuity = Perpetuity::new(5.0, 0.05).unwrap();
        assert!(matches!(
            perpetuity.cashflows(),
            Err(BondError::UnsupportedInstrumentClass { .. })
        ));
        assert_eq!(perpetuity.periods(), Periods::Perpetual);
    }
}
