//! Risk metrics for bonds.
//!
//! Duration and convexity are computed from cash-flow schedules at a
//! per-period yield, so they come out in periods and periods squared.

use serde::{Deserialize, Serialize};

use crate::cashflows::CashflowSchedule;
use crate::instruments::Instrument;

/// Macaulay duration: `sum(t * CF_t * (1 + y)^-t) / P`.
#[must_use]
pub fn macaulay_duration(schedule: &CashflowSchedule, ytm: f64, price: f64) -> f64 {
    let weighted: f64 = schedule
        .iter()
        .map(|flow| f64::from(flow.period) * flow.present_value(ytm))
        .sum();
    weighted / price
}

/// Yield convexity: `sum(t * (t + 1) * CF_t * (1 + y)^-(t + 2)) / P`.
#[must_use]
pub fn yield_convexity(schedule: &CashflowSchedule, ytm: f64, price: f64) -> f64 {
    let growth = 1.0 + ytm;
    let weighted: f64 = schedule
        .iter()
        .map(|flow| {
            let t = f64::from(flow.period);
            t * (t + 1.0) * flow.amount * growth.powi(-(flow.period as i32) - 2)
        })
        .sum();
    weighted / price
}

/// Second-order Taylor approximation of a price move:
/// `-D_mod * P * dy [+ 0.5 * C * P * dy^2]`.
#[must_use]
pub fn price_change(
    price: f64,
    modified_duration: f64,
    convexity: Option<f64>,
    ytm_change: f64,
) -> f64 {
    let first_order = -modified_duration * price * ytm_change;
    match convexity {
        Some(c) => first_order + 0.5 * c * price * ytm_change * ytm_change,
        None => first_order,
    }
}

/// Risk summary of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Price implied by the yield.
    pub price: f64,
    /// Macaulay duration in periods.
    pub macaulay_duration: f64,
    /// Modified duration in periods.
    pub modified_duration: f64,
    /// Yield convexity in periods squared.
    pub convexity: f64,
}

impl RiskMetrics {
    /// Collects the risk metrics of an instrument.
    #[must_use]
    pub fn of(instrument: &dyn Instrument) -> Self {
        Self {
            price: instrument.price(),
            macaulay_duration: instrument.macaulay_duration(),
            modified_duration: instrument.modified_duration(),
            convexity: instrument.convexity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_duration_two_period_bond() {
        let ytm = 0.05;
        let schedule = CashflowSchedule::bullet(100.0, 6.0, 2);
        let price = schedule.present_value(ytm);

        let z1 = 1.0 / 1.05;
        let z2 = z1 * z1;
        let expected = (6.0 * z1 + 2.0 * 106.0 * z2) / price;

        assert_relative_eq!(macaulay_duration(&schedule, ytm, price), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_convexity_matches_second_derivative() {
        let ytm = 0.04;
        let schedule = CashflowSchedule::bullet(100.0, 3.0, 6);
        let price = schedule.present_value(ytm);

        let h = 1e-4;
        let second = (schedule.present_value(ytm + h) - 2.0 * price
            + schedule.present_value(ytm - h))
            / (h * h);

        assert_relative_eq!(
            yield_convexity(&schedule, ytm, price),
            second / price,
            epsilon = 1e-4
        );
    }

    #[test]
    fn test_price_change() {
        assert_relative_eq!(price_change(100.0, 5.0, None, 0.01), -5.0);
        assert_relative_eq!(price_change(100.0, 5.0, Some(40.0), 0.01), -4.8);
    }
}
