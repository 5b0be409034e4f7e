//! # Strata Core
//!
//! Core types and discount math for the Strata term-structure library.
//!
//! This crate provides the foundational building blocks used throughout Strata:
//!
//! - **Types**: [`Compounding`] and [`Frequency`] conventions
//! - **Rates**: Conversions between discount factors, spot rates and forward rates
//! - **Money Market**: Treasury-bill pricing and bond-equivalent yields
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let df = discount_factor(0.05, 2.0, Compounding::SEMI_ANNUAL);
//! let rate = spot_rate(df, 2.0, Compounding::SEMI_ANNUAL).unwrap();
//! assert!((rate - 0.05).abs() < 1e-12);
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
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]

pub mod error;
pub mod money_market;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::money_market::{
        bond_equivalent_yield, days_between, parse_date, treasury_bill_price,
    };
    pub use crate::rates::{discount_factor, forward_rate, spot_rate, ForwardRate};
    pub use crate::types::{Compounding, Frequency};
}

pub use error::{CoreError, CoreResult};
pub use types::{Compounding, Frequency};
