//! Black (1976) model for options on forwards.

use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::{BondError, BondResult};
use crate::options::OptionType;

/// Prices a European option on a forward with Black's formula.
///
/// ```text
/// d1 = (ln(F/K) + sigma^2 T / 2) / (sigma sqrt(T)),  d2 = d1 - sigma sqrt(T)
/// call = DF * (F N(d1) - K N(d2))
/// put  = DF * (K N(-d2) - F N(-d1))
/// ```
///
/// # Errors
///
/// Returns [`BondError::InvalidInput`] unless forward, strike, volatility
/// and maturity are strictly positive.
///
/// # Example
///
/// ```rust
/// use strata_bonds::options::{black_option, OptionType};
///
/// let call = black_option(100.0, 100.0, 0.95, 0.2, 1.0, OptionType::Call).unwrap();
/// let put = black_option(100.0, 100.0, 0.95, 0.2, 1.0, OptionType::Put).unwrap();
/// // At the money forward: call and put agree.
/// assert!((call - put).abs() < 1e-12);
/// ```
pub fn black_option(
    forward: f64,
    strike: f64,
    discount_factor: f64,
    sigma: f64,
    maturity: f64,
    option_type: OptionType,
) -> BondResult<f64> {
    if !(forward > 0.0 && strike > 0.0 && sigma > 0.0 && maturity > 0.0) {
        return Err(BondError::invalid_input(format!(
            "Black formula needs positive forward, strike, volatility and maturity, \
             got F={forward}, K={strike}, sigma={sigma}, T={maturity}"
        )));
    }

    let normal = Normal::new(0.0, 1.0)
        .map_err(|err| BondError::invalid_input(format!("standard normal: {err}")))?;

    let vol_sqrt_t = sigma * maturity.sqrt();
    let d1 = ((forward / strike).ln() + 0.5 * sigma * sigma * maturity) / vol_sqrt_t;
    let d2 = d1 - vol_sqrt_t;

    let undiscounted = match option_type {
        OptionType::Call => forward * normal.cdf(d1) - strike * normal.cdf(d2),
        OptionType::Put => strike * normal.cdf(-d2) - forward * normal.cdf(-d1),
    };

    Ok(discount_factor * undiscounted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_put_call_parity() {
        let (f, k, df) = (102.0, 98.0, 0.97);
        let call = black_option(f, k, df, 0.15, 2.0, OptionType::Call).unwrap();
        let put = black_option(f, k, df, 0.15, 2.0, OptionType::Put).unwrap();
        assert_relative_eq!(call - put, df * (f - k), epsilon = 1e-10);
    }

    #[test]
    fn test_known_value() {
        // F = K = 100, sigma = 20%, T = 1: call = 100 * (2 N(0.1) - 1)
        let call = black_option(100.0, 100.0, 1.0, 0.2, 1.0, OptionType::Call).unwrap();
        assert_relative_eq!(call, 7.965567455405804, epsilon = 1e-9);
    }

    #[test]
    fn test_deep_in_the_money_call() {
        let call = black_option(200.0, 50.0, 0.9, 0.1, 0.5, OptionType::Call).unwrap();
        assert_relative_eq!(call, 0.9 * 150.0, epsilon = 1e-8);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(black_option(100.0, 100.0, 1.0, 0.0, 1.0, OptionType::Call).is_err());
        assert!(black_option(-1.0, 100.0, 1.0, 0.2, 1.0, OptionType::Put).is_err());
    }
}
