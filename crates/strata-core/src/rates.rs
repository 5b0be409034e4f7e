//! Conversions between discount factors, spot rates and forward rates.
//!
//! All functions are pure and take the compounding convention explicitly.
//! Terms are measured in years.
//!
//! # Example
//!
//! ```rust
//! use strata_core::rates::{discount_factor, forward_rate};
//! use strata_core::Compounding;
//!
//! let fwd = forward_rate(0.04, 1.0, 0.05, 2.0, Compounding::CONTINUOUS).unwrap();
//! assert!((fwd.rate - 0.06).abs() < 1e-12);
//! assert!((fwd.term - 1.0).abs() < 1e-12);
//!
//! let df = discount_factor(0.05, 1.0, Compounding::CONTINUOUS);
//! assert!((df - (-0.05_f64).exp()).abs() < 1e-15);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::Compounding;

/// A forward rate together with the term it spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForwardRate {
    /// Length of the forward period in years (`term_2 - term_1`).
    pub term: f64,
    /// Forward rate under the requested compounding.
    pub rate: f64,
}

/// Returns the discount factor for a spot rate held over `term` years.
#[must_use]
pub fn discount_factor(rate: f64, term: f64, compounding: Compounding) -> f64 {
    compounding.discount_factor(rate, term)
}

/// Returns the spot (zero) rate implied by a discount factor.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] if `term` or `discount_factor` is not
/// strictly positive.
pub fn spot_rate(discount_factor: f64, term: f64, compounding: Compounding) -> CoreResult<f64> {
    if !(term > 0.0) {
        return Err(CoreError::invalid_input(format!(
            "term must be positive, got {term}"
        )));
    }
    if !(discount_factor > 0.0) {
        return Err(CoreError::invalid_input(format!(
            "discount factor must be positive, got {discount_factor}"
        )));
    }
    Ok(compounding.zero_rate(discount_factor, term))
}

/// Returns the forward rate between two spot rates.
///
/// Under continuous compounding the forward is exact and linear in the
/// cumulative yield: `(r2 t2 - r1 t1) / (t2 - t1)`. Under discrete
/// compounding the forward is solved from the ratio of the two discount
/// factors over the intervening term.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInput`] unless `0 <= term_1 < term_2`.
pub fn forward_rate(
    spot_rate_1: f64,
    term_1: f64,
    spot_rate_2: f64,
    term_2: f64,
    compounding: Compounding,
) -> CoreResult<ForwardRate> {
    if !(term_1 >= 0.0) || !(term_2 > term_1) {
        return Err(CoreError::invalid_input(format!(
            "forward rate needs 0 <= term_1 < term_2, got {term_1} and {term_2}"
        )));
    }

    let term = term_2 - term_1;

    if compounding.is_continuous() {
        let rate = (spot_rate_2 * term_2 - spot_rate_1 * term_1) / term;
        return Ok(ForwardRate { term, rate });
    }

    let df_1 = compounding.discount_factor(spot_rate_1, term_1);
    let df_2 = compounding.discount_factor(spot_rate_2, term_2);
    let rate = spot_rate(df_2 / df_1, term, compounding)?;

    Ok(ForwardRate { term, rate })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_spot_rate_from_discount_factor() {
        let expected = 0.04;
        let df = (1.0 + expected / 2.0_f64).powf(-2.0);
        let actual = spot_rate(df, 1.0, Compounding::SEMI_ANNUAL).unwrap();
        assert_relative_eq!(actual, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_discount_factor_from_spot_rate() {
        let compounding = Compounding::periodic(3).unwrap();
        let expected = (1.0 + 0.05 / 3.0_f64).powf(-6.0);
        assert_relative_eq!(
            discount_factor(0.05, 2.0, compounding),
            expected,
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_continuous_round_trip() {
        let df = discount_factor(0.05, 1.0, Compounding::CONTINUOUS);
        assert_relative_eq!(df, (-0.05_f64).exp(), epsilon = 1e-15);
        let rate = spot_rate(df, 1.0, Compounding::CONTINUOUS).unwrap();
        assert_relative_eq!(rate, 0.05, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_rate_discrete() {
        let compounding = Compounding::QUARTERLY;
        let fwd = forward_rate(0.04, 0.5, 0.06, 1.0, compounding).unwrap();

        let df_1 = discount_factor(0.04, 0.5, compounding);
        let df_2 = discount_factor(0.06, 1.0, compounding);
        let df_fwd = discount_factor(fwd.rate, fwd.term, compounding);

        assert_relative_eq!(fwd.term, 0.5);
        assert_relative_eq!(df_2, df_1 * df_fwd, epsilon = 1e-14);
    }

    #[test]
    fn test_forward_rate_continuous_is_linear() {
        let fwd = forward_rate(0.03, 2.0, 0.04, 5.0, Compounding::CONTINUOUS).unwrap();
        assert_relative_eq!(fwd.rate, (0.04 * 5.0 - 0.03 * 2.0) / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_forward_from_time_zero_equals_spot() {
        let fwd = forward_rate(0.0, 0.0, 0.05, 2.0, Compounding::SEMI_ANNUAL).unwrap();
        assert_relative_eq!(fwd.rate, 0.05, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(spot_rate(0.95, 0.0, Compounding::ANNUAL).is_err());
        assert!(spot_rate(0.0, 1.0, Compounding::ANNUAL).is_err());
        assert!(spot_rate(f64::NAN, 1.0, Compounding::ANNUAL).is_err());
        assert!(forward_rate(0.04, 2.0, 0.05, 1.0, Compounding::ANNUAL).is_err());
        assert!(forward_rate(0.04, 1.0, 0.05, 1.0, Compounding::CONTINUOUS).is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn spot_rate_inverts_discount_factor(
                rate in -0.05f64..0.25,
                term in 0.1f64..30.0,
                periods in prop::sample::select(vec![0u32, 1, 2, 4, 12]),
            ) {
                let compounding = if periods == 0 {
                    Compounding::CONTINUOUS
                } else {
                    Compounding::periodic(periods).unwrap()
                };
                let df = discount_factor(rate, term, compounding);
                let back = spot_rate(df, term, compounding).unwrap();
                prop_assert!((back - rate).abs() < 1e-10, "{} -> {}", rate, back);
            }
        }
    }
}
