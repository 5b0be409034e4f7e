//! One-dimensional minimization: golden-section bracketing and Brent's
//! method.

use crate::error::{MathError, MathResult};
use crate::optimization::OptimizationConfig;

/// Default ratio by which successive bracketing intervals are magnified.
const GOLDEN_RATIO: f64 = 1.618034;

/// Golden-section fraction `(3 - sqrt(5)) / 2`.
const GOLDEN_SECTION: f64 = 0.381966;

/// Maximum magnification allowed for a parabolic-fit step while bracketing.
const GROW_LIMIT: f64 = 110.0;

/// Guards the parabolic step against division by zero.
const TINY: f64 = 1e-21;

/// Absolute tolerance floor for minima located near zero.
const ZEPS: f64 = 1e-11;

/// Smallest meaningful relative tolerance for a minimum: `sqrt(f64::EPSILON)`.
const MIN_RELATIVE_TOLERANCE: f64 = 1.4901161193847656e-8;

/// Three abscissas enclosing a minimum: `f(b) <= f(a)` and `f(b) <= f(c)`
/// with `b` between `a` and `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    /// Outer point.
    pub a: f64,
    /// Interior point with the lowest value.
    pub b: f64,
    /// Other outer point.
    pub c: f64,
    /// `f(a)`.
    pub fa: f64,
    /// `f(b)`.
    pub fb: f64,
    /// `f(c)`.
    pub fc: f64,
}

/// Result of a one-dimensional minimization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarMinimum {
    /// Abscissa of the minimum.
    pub x: f64,
    /// Objective value at `x`.
    pub value: f64,
    /// Brent iterations used.
    pub iterations: u32,
    /// Whether the relative tolerance was met within the iteration budget.
    pub converged: bool,
}

fn finite_or_inf(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        f64::INFINITY
    }
}

/// Searches downhill from the two starting points `xa` and `xb` until a
/// minimum is bracketed.
///
/// Steps grow by the golden ratio, with parabolic extrapolation when it
/// promises a larger stride. Non-finite objective values are treated as
/// `+inf`.
///
/// # Errors
///
/// Returns [`MathError::ConvergenceFailed`] if no bracket is found within
/// `config.max_iterations` steps or before the search overflows (for
/// example, a monotone objective).
pub fn bracket_minimum<F>(
    f: &mut F,
    xa: f64,
    xb: f64,
    config: &OptimizationConfig,
) -> MathResult<Bracket>
where
    F: FnMut(f64) -> f64,
{
    let mut eval = |x: f64| finite_or_inf(f(x));

    let (mut a, mut b) = (xa, xb);
    let (mut fa, mut fb) = (eval(a), eval(b));
    if fb > fa {
        std::mem::swap(&mut a, &mut b);
        std::mem::swap(&mut fa, &mut fb);
    }

    let mut c = b + GOLDEN_RATIO * (b - a);
    let mut fc = eval(c);
    let mut iterations = 0u32;

    while fc < fb {
        if iterations >= config.max_iterations || !c.is_finite() {
            return Err(MathError::convergence_failed(iterations, fc));
        }
        iterations += 1;

        let r = (b - a) * (fb - fc);
        let q = (b - c) * (fb - fa);
        let denom = (q - r).abs().max(TINY).copysign(q - r);
        let mut u = b - ((b - c) * q - (b - a) * r) / (2.0 * denom);
        let u_limit = b + GROW_LIMIT * (c - b);
        let mut fu;

        if (b - u) * (u - c) > 0.0 {
            // Parabolic u lies between b and c.
            fu = eval(u);
            if fu < fc {
                return Ok(Bracket::ordered(b, u, c, fb, fu, fc));
            } else if fu > fb {
                return Ok(Bracket::ordered(a, b, u, fa, fb, fu));
            }
            u = c + GOLDEN_RATIO * (c - b);
            fu = eval(u);
        } else if (c - u) * (u - u_limit) > 0.0 {
            // Parabolic u lies between c and its allowed limit.
            fu = eval(u);
            if fu < fc {
                b = c;
                c = u;
                u = c + GOLDEN_RATIO * (c - b);
                fb = fc;
                fc = fu;
                fu = eval(u);
            }
        } else if (u - u_limit) * (u_limit - c) >= 0.0 {
            u = u_limit;
            fu = eval(u);
        } else {
            u = c + GOLDEN_RATIO * (c - b);
            fu = eval(u);
        }

        a = b;
        b = c;
        c = u;
        fa = fb;
        fb = fc;
        fc = fu;
    }

    Ok(Bracket::ordered(a, b, c, fa, fb, fc))
}

impl Bracket {
    fn ordered(a: f64, b: f64, c: f64, fa: f64, fb: f64, fc: f64) -> Self {
        if a <= c {
            Self { a, b, c, fa, fb, fc }
        } else {
            Self {
                a: c,
                b,
                c: a,
                fa: fc,
                fb,
                fc: fa,
            }
        }
    }
}

/// Brent's method: golden-section search with parabolic interpolation,
/// starting from a bracket.
///
/// `config.tolerance` is the relative abscissa tolerance; it is floored at
/// `sqrt(f64::EPSILON)`, below which the minimum cannot be resolved.
/// Exhausting `config.max_iterations` yields the best point found with
/// `converged = false`.
pub fn brent_minimize<F>(f: &mut F, bracket: &Bracket, config: &OptimizationConfig) -> ScalarMinimum
where
    F: FnMut(f64) -> f64,
{
    let mut eval = |x: f64| finite_or_inf(f(x));
    let tol = config.tolerance.max(MIN_RELATIVE_TOLERANCE);

    let mut a = bracket.a.min(bracket.c);
    let mut b = bracket.a.max(bracket.c);
    let (mut x, mut w, mut v) = (bracket.b, bracket.b, bracket.b);
    let (mut fx, mut fw, mut fv) = (bracket.fb, bracket.fb, bracket.fb);
    let mut d = 0.0_f64;
    let mut e = 0.0_f64;

    for iteration in 0..config.max_iterations {
        let xm = 0.5 * (a + b);
        let tol1 = tol * x.abs() + ZEPS;
        let tol2 = 2.0 * tol1;

        if (x - xm).abs() <= tol2 - 0.5 * (b - a) {
            return ScalarMinimum {
                x,
                value: fx,
                iterations: iteration,
                converged: true,
            };
        }

        let mut golden = true;
        if e.abs() > tol1 {
            let r = (x - w) * (fx - fv);
            let mut q = (x - v) * (fx - fw);
            let mut p = (x - v) * q - (x - w) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let e_prev = e;
            e = d;

            if p.abs() < (0.5 * q * e_prev).abs() && p > q * (a - x) && p < q * (b - x) {
                d = p / q;
                let u = x + d;
                if u - a < tol2 || b - u < tol2 {
                    d = tol1.copysign(xm - x);
                }
                golden = false;
            }
        }
        if golden {
            e = if x >= xm { a - x } else { b - x };
            d = GOLDEN_SECTION * e;
        }

        let u = if d.abs() >= tol1 {
            x + d
        } else {
            x + tol1.copysign(d)
        };
        let fu = eval(u);

        if fu <= fx {
            if u >= x {
                a = x;
            } else {
                b = x;
            }
            v = w;
            w = x;
            x = u;
            fv = fw;
            fw = fx;
            fx = fu;
        } else {
            if u < x {
                a = u;
            } else {
                b = u;
            }
            if fu <= fw || w == x {
                v = w;
                w = u;
                fv = fw;
                fw = fu;
            } else if fu <= fv || v == x || v == w {
                v = u;
                fv = fu;
            }
        }
    }

    ScalarMinimum {
        x,
        value: fx,
        iterations: config.max_iterations,
        converged: false,
    }
}

/// Minimizes a scalar function without bounds: brackets a minimum starting
/// from `start` and `start + step`, then refines it with Brent's method.
///
/// # Example
///
/// ```rust
/// use strata_math::optimization::{minimize_scalar, OptimizationConfig};
///
/// let min = minimize_scalar(|x| (x - 3.0).powi(2) + 1.0, 0.0, 1.0, &OptimizationConfig::default())
///     .unwrap();
/// assert!((min.x - 3.0).abs() < 1e-6);
/// assert!((min.value - 1.0).abs() < 1e-12);
/// ```
pub fn minimize_scalar<F>(
    mut f: F,
    start: f64,
    step: f64,
    config: &OptimizationConfig,
) -> MathResult<ScalarMinimum>
where
    F: FnMut(f64) -> f64,
{
    if !(step != 0.0 && step.is_finite() && start.is_finite()) {
        return Err(MathError::invalid_input(format!(
            "bracketing needs a finite start and non-zero step, got {start} and {step}"
        )));
    }
    let bracket = bracket_minimum(&mut f, start, start + step, config)?;
    Ok(brent_minimize(&mut f, &bracket, config))
}
