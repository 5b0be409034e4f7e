//! Newton-Raphson root-finding algorithm.

use crate::error::{MathError, MathResult};
use crate::solvers::{SolverConfig, SolverResult};

/// Derivatives smaller than this abort the iteration.
const MIN_DERIVATIVE: f64 = 1e-15;

/// Newton-Raphson restricted to the open domain `x > lower`, safeguarded by
/// bisection.
///
/// A step that would land on or below `lower` is replaced by the midpoint
/// between the current iterate and `lower`, so every evaluation happens
/// inside the domain. Once two iterates straddle a sign change the bracket
/// is tracked, and a Newton step that leaves the bracket or fails to halve
/// the step before last is replaced by a bisection step. Used for yields,
/// where `1 + y` must stay positive.
///
/// An iterate is accepted only when both `|f(x)|` and the Newton step
/// `|f(x) / f'(x)|` are below the tolerance, so a residual that is small
/// only because `f` is flat does not end the search.
///
/// # Example
///
/// ```rust
/// use strata_math::solvers::{newton_raphson_bounded, SolverConfig};
///
/// let f = |x: f64| x * x - 2.0;
/// let df = |x: f64| 2.0 * x;
///
/// let result = newton_raphson_bounded(f, df, 1.5, 0.0, &SolverConfig::default()).unwrap();
/// assert!((result.root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
pub fn newton_raphson_bounded<F, DF>(
    f: F,
    df: DF,
    initial_guess: f64,
    lower: f64,
    config: &SolverConfig,
) -> MathResult<SolverResult>
where
    F: Fn(f64) -> f64,
    DF: Fn(f64) -> f64,
{
    if !(initial_guess > lower) {
        return Err(MathError::invalid_input(format!(
            "initial guess {initial_guess} is outside the domain x > {lower}"
        )));
    }

    let mut x = initial_guess;
    let mut previous: Option<(f64, f64)> = None;
    let mut bracket: Option<((f64, f64), (f64, f64))> = None;
    let mut last_step = f64::INFINITY;
    let mut step_before_last = f64::INFINITY;

    for iteration in 0..config.max_iterations {
        let fx = f(x);

        if !fx.is_finite() {
            return Err(MathError::convergence_failed(iteration, fx.abs()));
        }

        if fx == 0.0 {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        bracket = match bracket {
            Some((a, b)) if (a.1 < 0.0) == (fx < 0.0) => Some(((x, fx), b)),
            Some((a, _)) => Some((a, (x, fx))),
            None => previous
                .filter(|p| (p.1 < 0.0) != (fx < 0.0))
                .map(|p| (p, (x, fx))),
        };
        previous = Some((x, fx));

        let dfx = df(x);
        if !(dfx.abs() >= MIN_DERIVATIVE) {
            return Err(MathError::DivisionByZero { value: dfx });
        }

        let newton_step = fx / dfx;
        if fx.abs() < config.tolerance && newton_step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration,
                residual: fx,
            });
        }

        let mut next = x - newton_step;
        if let Some((a, b)) = bracket {
            let (lo, hi) = (a.0.min(b.0), a.0.max(b.0));
            let outside = !(next > lo && next < hi);
            let too_slow = (2.0 * fx).abs() > (step_before_last * dfx).abs();
            if outside || too_slow {
                next = 0.5 * (lo + hi);
            }
        }
        if next <= lower {
            next = 0.5 * (x + lower);
        }

        step_before_last = last_step;
        last_step = next - x;
        x = next;

        if last_step.abs() < config.tolerance {
            return Ok(SolverResult {
                root: x,
                iterations: iteration + 1,
                residual: f(x),
            });
        }
    }

    Err(MathError::convergence_failed(
        config.max_iterations,
        f(x).abs(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sqrt_2() {
        let f = |x: f64| x * x - 2.0;
        let df = |x: f64| 2.0 * x;

        let result = newton_raphson_bounded(f, df, 1.5, 0.0, &SolverConfig::default()).unwrap();

        assert_relative_eq!(result.root, std::f64::consts::SQRT_2, epsilon = 1e-10);
        assert!(result.iterations < 10);
    }

    #[test]
    fn test_zero_derivative_error() {
        let f = |x: f64| x * x * x - 1.0;
        let df = |x: f64| 3.0 * x * x;

        let result = newton_raphson_bounded(f, df, 0.0, -1.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::DivisionByZero { .. })));
    }

    #[test]
    fn test_small_residual_far_from_root() {
        // |f| is below the tolerance on all of (-1, 5], yet the root is at 3.
        let f = |x: f64| 1e-11 * (x - 3.0);
        let df = |_: f64| 1e-11;

        let result = newton_raphson_bounded(f, df, 0.05, -1.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_bounded_stays_in_domain() {
        // ln(1 + x) = -3 has its root at e^-3 - 1, close to the -1 boundary.
        // An unguarded step from 0.5 overshoots below -1.
        let f = |x: f64| {
            assert!(x > -1.0, "evaluated outside the domain at {x}");
            (1.0 + x).ln() + 3.0
        };
        let df = |x: f64| 1.0 / (1.0 + x);

        let result = newton_raphson_bounded(f, df, 0.5, -1.0, &SolverConfig::default()).unwrap();
        assert_relative_eq!(result.root, (-3.0_f64).exp() - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bounded_rejects_initial_guess_outside_domain() {
        let result = newton_raphson_bounded(|x| x, |_| 1.0, -2.0, -1.0, &SolverConfig::default());
        assert!(matches!(result, Err(MathError::InvalidInput { .. })));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        // Newton cycles between 0 and 1 on this cubic.
        let f = |x: f64| x * x * x - 2.0 * x + 2.0;
        let df = |x: f64| 3.0 * x * x - 2.0;

        let result = newton_raphson_bounded(f, df, 0.0, -10.0, &SolverConfig::new(1e-12, 20));
        assert!(matches!(result, Err(MathError::ConvergenceFailed { .. })));
    }
}
