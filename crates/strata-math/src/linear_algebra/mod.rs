//! Linear algebra utilities.
//!
//! Dense solves used by curve bootstrapping: forward substitution for the
//! lower-triangular systems produced by bullet bonds sorted by maturity, and
//! a pivoted LU solve for everything else.

use crate::error::{MathError, MathResult};
use nalgebra::{DMatrix, DVector};

/// Pivots smaller than this are treated as zero.
const SINGULAR_PIVOT: f64 = 1e-15;

fn check_square_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<usize> {
    let n = a.nrows();
    if n != a.ncols() {
        return Err(MathError::invalid_input("Matrix must be square"));
    }
    if n != b.len() {
        return Err(MathError::DimensionMismatch {
            rows1: n,
            cols1: n,
            rows2: b.len(),
            cols2: 1,
        });
    }
    Ok(n)
}

/// Returns true if every entry above the diagonal is within `tolerance` of
/// zero.
pub fn is_lower_triangular(matrix: &DMatrix<f64>, tolerance: f64) -> bool {
    (0..matrix.nrows()).all(|i| ((i + 1)..matrix.ncols()).all(|j| matrix[(i, j)].abs() <= tolerance))
}

/// Solves `L x = b` by forward substitution.
///
/// Entries above the diagonal of `l` are ignored.
pub fn solve_lower_triangular(l: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    let n = check_square_system(l, b)?;

    let mut x = DVector::zeros(n);
    for i in 0..n {
        let pivot = l[(i, i)];
        if pivot.abs() < SINGULAR_PIVOT {
            return Err(MathError::SingularMatrix);
        }
        let mut sum = b[i];
        for j in 0..i {
            sum -= l[(i, j)] * x[j];
        }
        x[i] = sum / pivot;
    }

    Ok(x)
}

/// Solves a square linear system `A x = b` using LU decomposition with
/// partial pivoting.
pub fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> MathResult<DVector<f64>> {
    check_square_system(a, b)?;

    a.clone().lu().solve(b).ok_or(MathError::SingularMatrix)
}
