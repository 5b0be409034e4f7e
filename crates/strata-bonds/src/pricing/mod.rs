//! Closed-form bond pricing and yield solving.
//!
//! Prices are computed from the annuity closed form:
//!
//! ```text
//! P(y) = c * a(y) + F * (1 + y)^-n,   a(y) = (1 - (1 + y)^-n) / y   (a(0) = n)
//! ```
//!
//! and yields are recovered with a Newton iteration on `ln P(y) - ln target`
//! that never leaves the domain `y > -1`. The log residual is relative, so
//! the tolerance stays meaningful for deep-discount prices far below 1. `P`
//! is log-convex in `y`, which makes the iteration converge monotonically
//! once it is below the root.

use tracing::debug;

use strata_math::solvers::{newton_raphson_bounded, SolverConfig};
use strata_math::MathError;

use crate::error::{BondError, BondResult};

/// Initial guess for yield solves.
pub const DEFAULT_YIELD_GUESS: f64 = 0.05;

/// Price of a bullet bond at a per-period yield.
///
/// # Example
///
/// ```rust
/// use strata_bonds::pricing::price_from_yield;
///
/// // Zero yield: the undiscounted sum of cash flows.
/// assert_eq!(price_from_yield(100.0, 6.5, 8, 0.0), 152.0);
/// ```
#[must_use]
pub fn price_from_yield(face_value: f64, coupon: f64, periods: u32, ytm: f64) -> f64 {
    // Log form keeps the annuity accurate for yields close to zero.
    let log_discount = -f64::from(periods) * ytm.ln_1p();
    let pv = log_discount.exp();
    let annuity = if ytm == 0.0 {
        f64::from(periods)
    } else {
        -log_discount.exp_m1() / ytm
    };
    coupon * annuity + face_value * pv
}

/// First derivative of [`price_from_yield`] with respect to the yield.
#[must_use]
pub fn price_derivative(face_value: f64, coupon: f64, periods: u32, ytm: f64) -> f64 {
    let log_growth = ytm.ln_1p();
    // d/dy (1 + y)^-t = -t (1 + y)^-(t + 1)
    let sensitivity = |t: f64| -t * (-(t + 1.0) * log_growth).exp();
    let coupons: f64 = (1..=periods).map(|t| coupon * sensitivity(f64::from(t))).sum();
    coupons + face_value * sensitivity(f64::from(periods))
}

/// Solves for the per-period yield that reprices a bullet bond to `price`,
/// starting from [`DEFAULT_YIELD_GUESS`].
///
/// # Errors
///
/// - [`BondError::InvalidInput`] for a non-positive price, zero periods or
///   a bond without positive cash flows
/// - [`BondError::NoConvergence`] when the iteration budget is exhausted or
///   the iteration stalls
pub fn yield_to_maturity(
    price: f64,
    face_value: f64,
    coupon: f64,
    periods: u32,
    config: &SolverConfig,
) -> BondResult<f64> {
    yield_to_maturity_with_guess(
        price,
        face_value,
        coupon,
        periods,
        DEFAULT_YIELD_GUESS,
        config,
    )
}

/// [`yield_to_maturity`] with an explicit initial guess.
pub fn yield_to_maturity_with_guess(
    price: f64,
    face_value: f64,
    coupon: f64,
    periods: u32,
    initial_guess: f64,
    config: &SolverConfig,
) -> BondResult<f64> {
    if !(price > 0.0) {
        return Err(BondError::invalid_input(format!(
            "price must be positive, got {price}"
        )));
    }
    if periods == 0 {
        return Err(BondError::invalid_input(
            "yield is undefined for an instrument with no remaining periods",
        ));
    }
    if face_value < 0.0 || coupon < 0.0 || face_value + coupon * f64::from(periods) <= 0.0 {
        return Err(BondError::invalid_input(format!(
            "cash flows must be non-negative and not all zero, got face {face_value}, coupon {coupon}"
        )));
    }

    let log_target = price.ln();
    let result = newton_raphson_bounded(
        |y| price_from_yield(face_value, coupon, periods, y).ln() - log_target,
        |y| {
            price_derivative(face_value, coupon, periods, y)
                / price_from_yield(face_value, coupon, periods, y)
        },
        initial_guess,
        -1.0,
        config,
    )
    .map_err(|err| match err {
        MathError::ConvergenceFailed {
            iterations,
            residual,
        } => BondError::NoConvergence {
            iterations,
            residual,
        },
        MathError::DivisionByZero { value } => BondError::NoConvergence {
            iterations: 0,
            residual: value,
        },
        other => BondError::Math(other),
    })?;

    debug!(
        price,
        ytm = result.root,
        iterations = result.iterations,
        "solved yield to maturity"
    );

    Ok(result.root)
}
