//! Per-period cash-flow schedules.
//!
//! A [`CashflowSchedule`] is an ordered list of `(period, amount)` pairs with
//! strictly increasing period indices starting at 1. Instruments regenerate
//! their schedule on every call to [`Instrument::cashflows`], so a schedule
//! can be consumed and requested again.
//!
//! [`Instrument::cashflows`]: crate::instruments::Instrument::cashflows

use serde::{Deserialize, Serialize};

use crate::error::{BondError, BondResult};

/// A single cash flow paid at the end of a discrete period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cashflow {
    /// Period index, starting at 1.
    pub period: u32,
    /// Amount paid.
    pub amount: f64,
}

impl Cashflow {
    /// Creates a cash flow.
    #[must_use]
    pub fn new(period: u32, amount: f64) -> Self {
        Self { period, amount }
    }

    /// Present value at a per-period yield.
    #[must_use]
    pub fn present_value(&self, ytm: f64) -> f64 {
        self.amount * (1.0 + ytm).powi(-(self.period as i32))
    }
}

/// An ordered schedule of cash flows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CashflowSchedule {
    flows: Vec<Cashflow>,
}

impl CashflowSchedule {
    /// Creates a schedule, validating that periods start at 1 or later and
    /// strictly increase.
    pub fn new(flows: Vec<Cashflow>) -> BondResult<Self> {
        let mut previous = 0;
        for flow in &flows {
            if flow.period <= previous {
                return Err(BondError::invalid_input(format!(
                    "cash-flow periods must be >= 1 and strictly increasing, got {} after {}",
                    flow.period, previous
                )));
            }
            previous = flow.period;
        }
        Ok(Self { flows })
    }

    /// Schedule of a bullet bond: `coupon` each period, `coupon + face` at the
    /// final period.
    #[must_use]
    pub fn bullet(face_value: f64, coupon: f64, periods: u32) -> Self {
        let flows = (1..=periods)
            .map(|period| {
                let amount = if period == periods {
                    coupon + face_value
                } else {
                    coupon
                };
                Cashflow::new(period, amount)
            })
            .collect();
        Self { flows }
    }

    /// Number of cash flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Returns true if there are no cash flows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Period of the final cash flow, or 0 for an empty schedule.
    #[must_use]
    pub fn last_period(&self) -> u32 {
        self.flows.last().map_or(0, |flow| flow.period)
    }

    /// Iterates over the cash flows in period order.
    pub fn iter(&self) -> std::slice::Iter<'_, Cashflow> {
        self.flows.iter()
    }

    /// Returns the cash flows as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Cashflow] {
        &self.flows
    }

    /// Dense amounts indexed by `period - 1`, zero-padded to `len` entries.
    ///
    /// Flows beyond `len` are dropped.
    #[must_use]
    pub fn to_dense(&self, len: usize) -> Vec<f64> {
        let mut dense = vec![0.0; len];
        for flow in &self.flows {
            if let Some(slot) = dense.get_mut(flow.period as usize - 1) {
                *slot += flow.amount;
            }
        }
        dense
    }

    /// Present value of the schedule at a per-period yield.
    #[must_use]
    pub fn present_value(&self, ytm: f64) -> f64 {
        self.flows.iter().map(|flow| flow.present_value(ytm)).sum()
    }
}

impl IntoIterator for CashflowSchedule {
    type Item = Cashflow;
    type IntoIter = std::vec::IntoIter<Cashflow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.into_iter()
    }
}

impl<'a> IntoIterator for &'a CashflowSchedule {
    type Item = &'a Cashflow;
    type IntoIter = std::slice::Iter<'a, Cashflow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_bullet_schedule() {
        let schedule = CashflowSchedule::bullet(100.0, 7.0, 2);
        let flows: Vec<(u32, f64)> = schedule.iter().map(|cf| (cf.period, cf.amount)).collect();
        assert_eq!(flows, vec![(1, 7.0), (2, 107.0)]);
        assert_eq!(schedule.last_period(), 2);
    }

    #[test]
    fn test_empty_bullet() {
        let schedule = CashflowSchedule::bullet(100.0, 5.0, 0);
        assert!(schedule.is_empty());
        assert_eq!(schedule.last_period(), 0);
    }

    #[test]
    fn test_rejects_unordered_periods() {
        let flows = vec![Cashflow::new(2, 1.0), Cashflow::new(1, 1.0)];
        assert!(CashflowSchedule::new(flows).is_err());
        assert!(CashflowSchedule::new(vec![Cashflow::new(0, 1.0)]).is_err());
        assert!(CashflowSchedule::new(vec![Cashflow::new(1, 1.0), Cashflow::new(3, 2.0)]).is_ok());
    }

    #[test]
    fn test_dense_padding() {
        let schedule = CashflowSchedule::bullet(100.0, 2.5, 2);
        assert_eq!(schedule.to_dense(4), vec![2.5, 102.5, 0.0, 0.0]);
        assert_eq!(schedule.to_dense(1), vec![2.5]);
    }

    #[test]
    fn test_present_value() {
        let schedule = CashflowSchedule::bullet(100.0, 5.0, 3);
        assert_relative_eq!(schedule.present_value(0.05), 100.0, epsilon = 1e-10);
        assert_relative_eq!(schedule.present_value(0.0), 115.0);
    }
}
