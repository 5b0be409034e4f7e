//! # Strata Curves
//!
//! Discount curve construction for the Strata term-structure library.
//!
//! This crate provides:
//!
//! - **Discount Curves**: Pillar curves with log-linear interpolation,
//!   zero and forward rates, and simple stitching
//! - **Bootstrap**: Exact discount factors from a full ladder of bullet bonds
//! - **Parametric Fitting**: Nelson-Siegel and Vasicek curves fitted to bond
//!   prices
//! - **Reports**: Term-structure tables of discount factors, zero and
//!   forward rates
//! - **PCA**: Level, slope and curvature decomposition of curve histories
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_bonds::prelude::*;
//! use strata_curves::prelude::*;
//! use strata_core::Compounding;
//!
//! let portfolio = [0.5, 1.0, 1.5, 2.0]
//!     .iter()
//!     .fold(Portfolio::new(), |p, &m| p.with(TreasuryNote::new(0.05, m, 0.04).unwrap()));
//!
//! let result = Bootstrapper::default().bootstrap(&portfolio).unwrap();
//! let report = TermStructureReport::from_curve(&result.curve, Compounding::SEMI_ANNUAL).unwrap();
//!
//! for point in &report.points {
//!     assert!((point.zero_rate - 0.04).abs() < 1e-10);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::float_cmp)]

pub mod bootstrap;
pub mod curve;
pub mod error;
pub mod parametric;
pub mod pca;
pub mod report;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{bootstrap, BootstrapResult, Bootstrapper};
    pub use crate::curve::DiscountCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::parametric::{
        CurveFitter, FitQuote, FitResult, ModelKind, NelsonSiegel, ParametricModel, Vasicek,
    };
    pub use crate::pca::YieldCurvePca;
    pub use crate::report::{TermStructurePoint, TermStructureReport};
}

pub use curve::DiscountCurve;
pub use error::{CurveError, CurveResult};
