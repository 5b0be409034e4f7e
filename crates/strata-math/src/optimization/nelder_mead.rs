//! Nelder-Mead simplex minimization.

use crate::error::{MathError, MathResult};
use crate::optimization::{OptimizationConfig, OptimizationResult};

const REFLECTION: f64 = 1.0;
const EXPANSION: f64 = 2.0;
const CONTRACTION: f64 = 0.5;
const SHRINK: f64 = 0.5;

/// Edge length used for a starting coordinate that is exactly zero.
const ZERO_COORDINATE_STEP: f64 = 0.00025;

/// Minimizes `f` over `R^n` with the Nelder-Mead simplex method.
///
/// The starting simplex perturbs each coordinate of `initial` by
/// `config.initial_step` relative to its magnitude. Non-finite objective
/// values are treated as `+inf`, so the simplex retreats from regions where
/// the objective is undefined. The search is fully deterministic.
///
/// Terminates when both the spread of objective values across the simplex
/// is within `config.tolerance` and the simplex diameter is within
/// `config.parameter_tolerance`, or when the iteration budget is exhausted.
/// Exhaustion is reported through `converged = false`, not as an error.
///
/// # Example
///
/// ```rust
/// use strata_math::optimization::{nelder_mead, OptimizationConfig};
///
/// let rosenbrock = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);
/// let result = nelder_mead(rosenbrock, &[-1.2, 1.0], &OptimizationConfig::default()).unwrap();
///
/// assert!(result.converged);
/// assert!((result.parameters[0] - 1.0).abs() < 1e-4);
/// ```
pub fn nelder_mead<F>(
    mut f: F,
    initial: &[f64],
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: FnMut(&[f64]) -> f64,
{
    let dim = initial.len();
    if dim == 0 {
        return Err(MathError::invalid_input(
            "Nelder-Mead needs at least one parameter",
        ));
    }

    let mut objective = |x: &[f64]| {
        let value = f(x);
        if value.is_finite() {
            value
        } else {
            f64::INFINITY
        }
    };

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    let mut values: Vec<f64> = Vec::with_capacity(dim + 1);
    let mut evaluations = 0u32;

    simplex.push(initial.to_vec());
    values.push(objective(initial));
    evaluations += 1;

    for d in 0..dim {
        let mut vertex = initial.to_vec();
        vertex[d] = if vertex[d] == 0.0 {
            ZERO_COORDINATE_STEP
        } else {
            vertex[d] * (1.0 + config.initial_step)
        };
        values.push(objective(&vertex));
        simplex.push(vertex);
        evaluations += 1;
    }

    let mut iterations = 0u32;
    let mut converged = false;

    while iterations < config.max_iterations {
        sort_simplex(&mut simplex, &mut values);

        let spread = values[dim] - values[0];
        let diameter = simplex
            .iter()
            .skip(1)
            .map(|vertex| max_abs_diff(vertex, &simplex[0]))
            .fold(0.0_f64, f64::max);

        if spread <= config.tolerance && diameter <= config.parameter_tolerance {
            converged = true;
            break;
        }

        iterations += 1;

        let centroid: Vec<f64> = (0..dim)
            .map(|d| simplex.iter().take(dim).map(|x| x[d]).sum::<f64>() / dim as f64)
            .collect();
        let towards = |coefficient: f64, from: &[f64]| -> Vec<f64> {
            centroid
                .iter()
                .zip(from)
                .map(|(c, x)| c + coefficient * (x - c))
                .collect()
        };

        let reflected = towards(-REFLECTION, &simplex[dim]);
        let f_reflected = objective(&reflected);
        evaluations += 1;

        if f_reflected < values[0] {
            let expanded = towards(EXPANSION, &reflected);
            let f_expanded = objective(&expanded);
            evaluations += 1;

            if f_expanded < f_reflected {
                simplex[dim] = expanded;
                values[dim] = f_expanded;
            } else {
                simplex[dim] = reflected;
                values[dim] = f_reflected;
            }
            continue;
        }

        if f_reflected < values[dim - 1] {
            simplex[dim] = reflected;
            values[dim] = f_reflected;
            continue;
        }

        // Outside contraction if the reflection beat the worst vertex,
        // inside contraction otherwise.
        let (contracted, threshold) = if f_reflected < values[dim] {
            (towards(CONTRACTION, &reflected), f_reflected)
        } else {
            (towards(CONTRACTION, &simplex[dim]), values[dim])
        };
        let f_contracted = objective(&contracted);
        evaluations += 1;

        if f_contracted <= threshold {
            simplex[dim] = contracted;
            values[dim] = f_contracted;
            continue;
        }

        let best = simplex[0].clone();
        for i in 1..=dim {
            for (x, b) in simplex[i].iter_mut().zip(&best) {
                *x = b + SHRINK * (*x - b);
            }
            values[i] = objective(&simplex[i]);
            evaluations += 1;
        }
    }

    sort_simplex(&mut simplex, &mut values);

    Ok(OptimizationResult {
        parameters: simplex.swap_remove(0),
        objective_value: values[0],
        iterations,
        evaluations,
        converged,
    })
}

fn sort_simplex(simplex: &mut Vec<Vec<f64>>, values: &mut Vec<f64>) {
    let mut order: Vec<usize> = (0..simplex.len()).collect();
    order.sort_by(|&i, &j| values[i].total_cmp(&values[j]));

    *simplex = order.iter().map(|&i| simplex[i].clone()).collect();
    *values = order.iter().map(|&i| values[i]).collect();
}

fn max_abs_diff(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0_f64, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_bowl() {
        let f = |p: &[f64]| (p[0] - 2.0).powi(2) + (p[1] + 3.0).powi(2);
        let result = nelder_mead(f, &[0.0, 0.0], &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 2.0, epsilon = 1e-6);
        assert_relative_eq!(result.parameters[1], -3.0, epsilon = 1e-6);
        assert!(result.objective_value < 1e-12);
    }

    #[test]
    fn test_rosenbrock() {
        let f = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);
        let result = nelder_mead(f, &[-1.2, 1.0], &OptimizationConfig::default()).unwrap();

        assert!(result.converged);
        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-5);
        assert_relative_eq!(result.parameters[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_non_finite_region_is_avoided() {
        // Undefined for x <= 0; minimum at x = 1.
        let f = |p: &[f64]| {
            if p[0] <= 0.0 {
                f64::NAN
            } else {
                p[0] - p[0].ln()
            }
        };
        let result = nelder_mead(f, &[3.0], &OptimizationConfig::default()).unwrap();

        assert_relative_eq!(result.parameters[0], 1.0, epsilon = 1e-5);
        assert!(result.objective_value.is_finite());
    }

    #[test]
    fn test_deterministic() {
        let f = |p: &[f64]| (p[0] - 0.3).powi(4) + (p[1] * p[0] - 1.0).powi(2);
        let config = OptimizationConfig::default();
        let a = nelder_mead(f, &[1.0, 1.0], &config).unwrap();
        let b = nelder_mead(f, &[1.0, 1.0], &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_iteration_budget() {
        let f = |p: &[f64]| (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2);
        let config = OptimizationConfig::default().with_max_iterations(3);
        let result = nelder_mead(f, &[-1.2, 1.0], &config).unwrap();

        assert!(!result.converged);
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_empty_parameters_rejected() {
        let result = nelder_mead(|_| 0.0, &[], &OptimizationConfig::default());
        assert!(result.is_err());
    }
}
