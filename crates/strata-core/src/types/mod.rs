//! Domain types for fixed income analytics.
//!
//! - [`Frequency`]: Coupon payment frequency
//! - [`Compounding`]: Interest compounding convention

mod frequency;

pub use frequency::{Compounding, Frequency};
