//! # Strata Math
//!
//! Numerical kernels for the Strata term-structure library.
//!
//! This crate provides:
//!
//! - **Solvers**: Domain-guarded Newton-Raphson root finding
//! - **Optimization**: Nelder-Mead simplex search and bracketed Brent minimization
//! - **Linear Algebra**: Triangular and general dense linear solves
//!
//! Every iterative routine is bounded by a maximum iteration count taken from
//! its configuration.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod linear_algebra;
pub mod optimization;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::linear_algebra::{
        is_lower_triangular, solve_linear_system, solve_lower_triangular,
    };
    pub use crate::optimization::{
        bracket_minimum, brent_minimize, minimize_scalar, nelder_mead, Bracket,
        OptimizationConfig, OptimizationResult, ScalarMinimum,
    };
    pub use crate::solvers::{newton_raphson_bounded, SolverConfig, SolverResult};
}

pub use error::{MathError, MathResult};
