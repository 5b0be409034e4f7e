//! Curve bootstrapping from a portfolio of bullet bonds.
//!
//! Given one instrument maturing at each period `1..n`, the cash-flow
//! matrix `CF` (rows sorted by maturity) and price vector `P` determine the
//! discount factors `D` through `CF · D = P`. Bullet bonds sorted by
//! maturity give a lower-triangular `CF`, solved by forward substitution;
//! any other square system falls back to an LU solve.
//!
//! # Example
//!
//! ```rust
//! use strata_bonds::instruments::TreasuryNote;
//! use strata_bonds::portfolio::Portfolio;
//! use strata_bonds::Instrument;
//! use strata_curves::bootstrap::bootstrap;
//!
//! let portfolio = [0.5, 1.0, 1.5]
//!     .iter()
//!     .fold(Portfolio::new(), |p, &m| p.with(TreasuryNote::new(0.06, m, 0.06).unwrap()));
//!
//! let zeros = bootstrap(&portfolio).unwrap();
//! assert_eq!(zeros.len(), 3);
//! assert!((zeros[2].ytm() - 0.03).abs() < 1e-10);
//! ```

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};
use tracing::debug;

use strata_bonds::instruments::{Periods, ZeroCouponBond};
use strata_bonds::portfolio::Portfolio;
use strata_bonds::Instrument;
use strata_math::linear_algebra::{is_lower_triangular, solve_linear_system, solve_lower_triangular};

use crate::curve::DiscountCurve;
use crate::error::{CurveError, CurveResult};

/// Result of a bootstrap: one unit-face zero per period and the curve they
/// define.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult {
    /// Zero-coupon bonds with face 1 maturing at periods `1..n`.
    pub zeros: Vec<ZeroCouponBond>,
    /// Discount curve with a pillar at every period.
    pub curve: DiscountCurve,
}

impl BootstrapResult {
    /// Discount factors by period.
    #[must_use]
    pub fn discount_factors(&self) -> Vec<f64> {
        self.zeros.iter().map(ZeroCouponBond::discount_factor).collect()
    }
}

/// Bootstraps discount factors from a portfolio, mapping periods to years
/// with a fixed period length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bootstrapper {
    /// Length of one period in years.
    pub period_length: f64,
}

impl Default for Bootstrapper {
    fn default() -> Self {
        Self { period_length: 0.5 }
    }
}

impl Bootstrapper {
    /// Creates a bootstrapper for the given period length in years.
    pub fn new(period_length: f64) -> CurveResult<Self> {
        if !(period_length > 0.0) || !period_length.is_finite() {
            return Err(CurveError::invalid_input(format!(
                "period length must be positive, got {period_length}"
            )));
        }
        Ok(Self { period_length })
    }

    /// Solves for one discount factor per period.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::NotBootstrappable`] before any solve unless the
    /// portfolio's period counts are exactly `{1, ..., n}`.
    pub fn bootstrap(&self, portfolio: &Portfolio) -> CurveResult<BootstrapResult> {
        if !portfolio.can_bootstrap() {
            return Err(CurveError::not_bootstrappable(format!(
                "period counts of {} instruments do not cover 1..n exactly once",
                portfolio.len()
            )));
        }

        let order = maturity_order(portfolio);
        let unsorted = portfolio.cash_flow_matrix()?;
        let prices = portfolio.prices();

        let n = order.len();
        let cash_flows = DMatrix::from_fn(n, n, |row, col| unsorted[(order[row], col)]);
        let prices = DVector::from_fn(n, |row, _| prices[order[row]]);

        let discount_factors = if is_lower_triangular(&cash_flows, 0.0) {
            debug!(n, "bootstrapping by forward substitution");
            solve_lower_triangular(&cash_flows, &prices)?
        } else {
            debug!(n, "bootstrapping by LU decomposition");
            solve_linear_system(&cash_flows, &prices)?
        };

        let zeros = discount_factors
            .iter()
            .zip(1u32..)
            .map(|(&df, period)| ZeroCouponBond::from_discount_factor(df, period))
            .collect::<Result<Vec<_>, _>>()?;

        let curve = DiscountCurve::from_zeros(discount_factors.as_slice(), self.period_length)?;

        Ok(BootstrapResult { zeros, curve })
    }
}

/// Bootstraps unit-face zeros from a portfolio with semi-annual periods.
pub fn bootstrap(portfolio: &Portfolio) -> CurveResult<Vec<ZeroCouponBond>> {
    Ok(Bootstrapper::default().bootstrap(portfolio)?.zeros)
}

/// Instrument indices sorted by period count.
fn maturity_order(portfolio: &Portfolio) -> Vec<usize> {
    let mut order: Vec<(u32, usize)> = portfolio
        .iter()
        .enumerate()
        .filter_map(|(i, instrument)| match instrument.periods() {
            Periods::Finite(n) => Some((n, i)),
            Periods::Perpetual => None,
        })
        .collect();
    order.sort_unstable();
    order.into_iter().map(|(_, i)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use strata_bonds::instruments::{CouponBond, Perpetuity, TreasuryNote};

    fn notes(maturities: &[f64], coupon_rate: f64, annual_ytm: f64) -> Portfolio {
        maturities.iter().fold(Portfolio::new(), |portfolio, &m| {
            portfolio.with(TreasuryNote::new(coupon_rate, m, annual_ytm).unwrap())
        })
    }

    #[test]
    fn test_par_notes_give_flat_zeros() {
        let portfolio = notes(&[0.5, 1.0, 1.5, 2.0], 0.1, 0.1);
        let zeros = bootstrap(&portfolio).unwrap();

        assert_eq!(zeros.len(), 4);
        for (zero, period) in zeros.iter().zip(1u32..) {
            assert_eq!(zero.period_count(), period);
            assert_relative_eq!(zero.face_value(), 1.0);
            assert_relative_eq!(zero.ytm(), 0.05, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let sorted = notes(&[0.5, 1.0, 1.5], 0.04, 0.05);
        let shuffled = notes(&[1.5, 0.5, 1.0], 0.04, 0.05);

        let a = Bootstrapper::default().bootstrap(&sorted).unwrap();
        let b = Bootstrapper::default().bootstrap(&shuffled).unwrap();
        for (x, y) in a.discount_factors().iter().zip(b.discount_factors()) {
            assert_relative_eq!(*x, y, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_reprices_inputs() {
        let portfolio = Portfolio::new()
            .with(CouponBond::new(100.0, 3.0, 1, 0.02).unwrap())
            .with(CouponBond::new(100.0, 5.0, 2, 0.03).unwrap())
            .with(CouponBond::new(100.0, 0.0, 3, 0.035).unwrap());

        let result = Bootstrapper::new(1.0).unwrap().bootstrap(&portfolio).unwrap();
        let dfs = DVector::from_vec(result.discount_factors());
        let repriced = portfolio.cash_flow_matrix().unwrap() * dfs;

        for (model, market) in repriced.iter().zip(portfolio.prices().iter()) {
            assert_relative_eq!(*model, *market, epsilon = 1e-10);
        }
        assert_eq!(result.curve.tenors(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_rejects_gaps_before_solving() {
        let portfolio = notes(&[0.5, 1.5], 0.05, 0.05);
        assert!(matches!(
            bootstrap(&portfolio),
            Err(CurveError::NotBootstrappable { .. })
        ));

        let with_perpetuity = notes(&[0.5], 0.05, 0.05).with(Perpetuity::new(5.0, 0.05).unwrap());
        assert!(matches!(
            bootstrap(&with_perpetuity),
            Err(CurveError::NotBootstrappable { .. })
        ));

        assert!(bootstrap(&Portfolio::new()).is_err());
    }
}
