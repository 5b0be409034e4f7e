//! # Strata Bonds
//!
//! Bond instruments and closed-form valuation for the Strata term-structure
//! library.
//!
//! This crate provides:
//!
//! - **Instruments**: Coupon bonds, zero-coupon bonds, perpetuities and
//!   US Treasury notes behind the [`Instrument`] trait, plus inverse
//!   floating-rate bond analytics
//! - **Cash Flows**: Regenerable per-period cash-flow schedules
//! - **Pricing**: Price from yield and yield from price
//! - **Risk**: Macaulay and modified duration, yield convexity, price-change
//!   approximations
//! - **Portfolio**: Bootstrap eligibility and cash-flow matrix assembly
//! - **Options**: Black (1976) formula for options on forwards
//!
//! All yields are per-period rates; a semi-annual bond quoted at 5% annual
//! carries a per-period yield of 2.5%.
//!
//! ## Example
//!
//! ```rust
//! use strata_bonds::prelude::*;
//!
//! let bond = CouponBond::new(100.0, 7.0, 10, 0.07).unwrap();
//! assert!((bond.price() - 100.0).abs() < 1e-10);
//! assert!((bond.macaulay_duration() - 7.51523225).abs() < 1e-7);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::return_self_not_must_use)]

pub mod cashflows;
pub mod error;
pub mod instruments;
pub mod options;
pub mod portfolio;
pub mod pricing;
pub mod risk;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cashflows::{Cashflow, CashflowSchedule};
    pub use crate::error::{BondError, BondResult};
    pub use crate::instruments::{
        period_ytm, CouponBond, Instrument, InstrumentKind, InverseFloatingRateBond, Periods,
        Perpetuity, TreasuryNote, ZeroCouponBond,
    };
    pub use crate::options::{black_option, ExerciseStyle, OptionType};
    pub use crate::portfolio::Portfolio;
    pub use crate::pricing::{price_from_yield, yield_to_maturity};
    pub use crate::risk::RiskMetrics;
}

pub use error::{BondError, BondResult};
pub use instruments::Instrument;
