//! Leveraged inverse floating-rate bond.

use serde::{Deserialize, Serialize};

use strata_core::Frequency;

use crate::error::{BondError, BondResult};

/// Semi-annual reset schedule of the floating leg.
const RESET_FREQUENCY: Frequency = Frequency::SemiAnnual;

/// Face value of the replicating components.
const FACE_VALUE: f64 = 100.0;

/// Analytics of an inverse floater paying `fixed_coupon - leverage * r`.
///
/// Valued by replication from a semi-annual zero curve:
///
/// ```text
/// IF = CouponBond(fixed_coupon) + L * Zero(T) - L * Floater
/// ```
///
/// The floater is priced at par just after a reset, so its duration is the
/// time to the next reset. Duration and convexity are value-weighted
/// combinations of the components, in years.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InverseFloatingRateBond {
    /// Price per 100 face.
    pub price: f64,
    /// Duration in years.
    pub duration: f64,
    /// Convexity in years squared.
    pub convexity: f64,
    /// Leverage applied to the floating rate.
    pub leverage: f64,
}

impl InverseFloatingRateBond {
    /// Values an inverse floater from semi-annual zero-coupon prices.
    ///
    /// `zero_prices[i]` discounts a payment at `(i + 1) / 2` years.
    /// `fixed_coupon` is the annual fixed coupon per 100 face.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::Construction`] if the maturity is not a whole
    /// number of half-years or exceeds the supplied zero curve, or if the
    /// resulting price is not positive.
    pub fn from_zeros(
        zero_prices: &[f64],
        fixed_coupon: f64,
        maturity: f64,
        leverage: f64,
    ) -> BondResult<Self> {
        let per_year = f64::from(RESET_FREQUENCY.periods_per_year());
        let dt = RESET_FREQUENCY.period_length();
        let raw_periods = maturity * per_year;
        if raw_periods < 1.0 || (raw_periods - raw_periods.round()).abs() > 1e-9 {
            return Err(BondError::construction(format!(
                "inverse floater maturity must be a positive multiple of half a year, got {maturity}"
            )));
        }
        let periods = raw_periods.round() as usize;
        if periods > zero_prices.len() {
            return Err(BondError::construction(format!(
                "maturity {maturity} needs {periods} zero prices, got {}",
                zero_prices.len()
            )));
        }

        let coupon = fixed_coupon / per_year;
        let zeros = &zero_prices[..periods];

        // Fixed-coupon bond.
        let mut fixed_price = 0.0;
        let mut fixed_duration = 0.0;
        let mut fixed_convexity = 0.0;
        for (i, z) in zeros.iter().enumerate() {
            let t = (i + 1) as f64 * dt;
            let cashflow = if i + 1 == periods {
                coupon + FACE_VALUE
            } else {
                coupon
            };
            let pv = cashflow * z;
            fixed_price += pv;
            fixed_duration += t * pv;
            fixed_convexity += t * t * pv;
        }

        let zero_value = leverage * FACE_VALUE * zeros[periods - 1];
        let floater_value = leverage * FACE_VALUE;
        let horizon = periods as f64 * dt;

        let price = fixed_price + zero_value - floater_value;
        if !(price > 0.0) {
            return Err(BondError::construction(format!(
                "inverse floater replication has non-positive value {price}"
            )));
        }

        let duration = (fixed_duration + zero_value * horizon - floater_value * dt) / price;
        let convexity =
            (fixed_convexity + zero_value * horizon * horizon - floater_value * dt * dt) / price;

        Ok(Self {
            price,
            duration,
            convexity,
            leverage,
        })
    }
}
