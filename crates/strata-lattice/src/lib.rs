//! # Strata Lattice
//!
//! Recombining binomial short-rate trees for the Strata term-structure
//! library.
//!
//! This crate provides:
//!
//! - **Trees**: Flat triangular storage for rates, zero prices and values
//! - **Models**: Ho-Lee (additive) and Black-Derman-Toy (lognormal) rate
//!   dynamics
//! - **Calibration**: Period-by-period drift fitting to a zero curve, with
//!   per-period residuals
//! - **Pricing**: Coupon bonds, European and American bond options, and
//!   callable bonds by backward induction
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_lattice::prelude::*;
//!
//! let zeros: Vec<f64> = (1..=10).map(|k| (-0.04 * 0.5 * k as f64).exp()).collect();
//! let tree = TreeCalibrator::default().calibrate(&HoLee::new(0.01), &zeros).unwrap();
//! assert!(tree.mean_absolute_error() < 1e-7);
//!
//! let price = tree.pricer().bond_price(&BondSpec::new(100.0, 0.04, 10)).unwrap();
//! assert!((price - 100.0).abs() < 0.5);
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

pub mod calibration;
pub mod error;
pub mod models;
pub mod pricing;
pub mod tree;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calibration::{CalibratedTree, CalibratorConfig, TreeCalibrator};
    pub use crate::error::{LatticeError, LatticeResult};
    pub use crate::models::{BlackDermanToy, HoLee, ModelKind, ShortRateModel};
    pub use crate::pricing::{BondSpec, CallableValue, OptionSpec, TreePricer};
    pub use crate::tree::{backfill, PriceTree, RateTree, TriangularTree, ZeroTree};
    pub use strata_bonds::options::{ExerciseStyle, OptionType};
}

pub use calibration::{CalibratedTree, TreeCalibrator};
pub use error::{LatticeError, LatticeResult};
