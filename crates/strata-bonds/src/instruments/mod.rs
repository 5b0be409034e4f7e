//! Bond instruments.
//!
//! Every instrument is an immutable value object carrying a face value, a
//! periodic coupon amount, a number of discrete periods and a per-period
//! yield. The [`Instrument`] trait is object-safe so heterogeneous
//! collections can be held as `Box<dyn Instrument>`.
//!
//! - [`CouponBond`]: Bullet bond with a fixed coupon
//! - [`ZeroCouponBond`]: Coupon bond with no coupon
//! - [`Perpetuity`]: Coupon paid forever, no redemption
//! - [`TreasuryNote`]: US Treasury note conventions over a [`CouponBond`]
//! - [`InverseFloatingRateBond`]: Analytics of a leveraged inverse floater

mod coupon_bond;
mod inverse_floater;
mod perpetuity;
mod treasury_note;
mod zero_coupon;

pub use coupon_bond::CouponBond;
pub use inverse_floater::InverseFloatingRateBond;
pub use perpetuity::Perpetuity;
pub use treasury_note::{period_ytm, TreasuryNote};
pub use zero_coupon::ZeroCouponBond;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cashflows::CashflowSchedule;
use crate::error::BondResult;
use crate::risk;

/// Instrument class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    /// Fixed coupon bullet bond.
    CouponBond,
    /// Zero-coupon bond.
    ZeroCouponBond,
    /// Perpetual annuity.
    Perpetuity,
    /// US Treasury note.
    TreasuryNote,
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstrumentKind::CouponBond => "CouponBond",
            InstrumentKind::ZeroCouponBond => "ZeroCouponBond",
            InstrumentKind::Perpetuity => "Perpetuity",
            InstrumentKind::TreasuryNote => "TreasuryNote",
        };
        write!(f, "{name}")
    }
}

/// Number of remaining coupon periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Periods {
    /// A fixed, non-negative number of periods.
    Finite(u32),
    /// Payments continue forever.
    Perpetual,
}

impl Periods {
    /// Returns the period count, or `None` for a perpetual instrument.
    #[must_use]
    pub fn finite(&self) -> Option<u32> {
        match self {
            Periods::Finite(n) => Some(*n),
            Periods::Perpetual => None,
        }
    }
}

impl fmt::Display for Periods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Periods::Finite(n) => write!(f, "{n}"),
            Periods::Perpetual => write!(f, "inf"),
        }
    }
}

/// Common interface for bond instruments.
///
/// Durations are measured in periods and convexity in periods squared,
/// consistent with the per-period yield.
pub trait Instrument: fmt::Debug + Send + Sync {
    /// Instrument class.
    fn kind(&self) -> InstrumentKind;

    /// Redemption amount.
    fn face_value(&self) -> f64;

    /// Coupon paid each period.
    fn coupon(&self) -> f64;

    /// Remaining periods.
    fn periods(&self) -> Periods;

    /// Per-period yield to maturity.
    fn ytm(&self) -> f64;

    /// Price implied by the yield.
    fn price(&self) -> f64;

    /// Regenerates the cash-flow schedule.
    ///
    /// # Errors
    ///
    /// Returns [`BondError::UnsupportedInstrumentClass`] for instruments
    /// without a finite schedule.
    ///
    /// [`BondError::UnsupportedInstrumentClass`]: crate::error::BondError::UnsupportedInstrumentClass
    fn cashflows(&self) -> BondResult<CashflowSchedule>;

    /// Macaulay duration in periods.
    fn macaulay_duration(&self) -> f64;

    /// Yield convexity in periods squared.
    fn convexity(&self) -> f64;

    /// Modified duration: `D / (1 + y)`.
    fn modified_duration(&self) -> f64 {
        self.macaulay_duration() / (1.0 + self.ytm())
    }

    /// Approximate price change for a yield move of `ytm_change`.
    fn price_change(&self, ytm_change: f64, use_convexity: bool) -> f64 {
        let convexity = use_convexity.then(|| self.convexity());
        risk::price_change(
            self.price(),
            self.modified_duration(),
            convexity,
            ytm_change,
        )
    }
}
