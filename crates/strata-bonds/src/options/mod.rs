//! Option payoff types and closed-form option pricing.
//!
//! - [`black_option`]: Black (1976) formula for options on forwards
//!
//! [`OptionType`] and [`ExerciseStyle`] are shared with the lattice pricers.

mod black;

pub use black::black_option;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy at the strike.
    Call,
    /// Right to sell at the strike.
    Put,
}

impl OptionType {
    /// Intrinsic value of exercising against `underlying`.
    #[must_use]
    pub fn intrinsic(&self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (underlying - strike).max(0.0),
            OptionType::Put => (strike - underlying).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// When an option may be exercised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Only at expiry.
    European,
    /// At any step from the lockout onwards.
    American,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intrinsic() {
        assert_eq!(OptionType::Call.intrinsic(105.0, 100.0), 5.0);
        assert_eq!(OptionType::Call.intrinsic(95.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.intrinsic(95.0, 100.0), 5.0);
    }
}
