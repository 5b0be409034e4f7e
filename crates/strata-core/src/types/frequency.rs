//! Frequency and compounding types.

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Payment frequency for coupon bonds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Frequency {
    /// Annual payments (1 per year)
    Annual,
    /// Semi-annual payments (2 per year) - most common for US bonds
    #[default]
    SemiAnnual,
    /// Quarterly payments (4 per year)
    Quarterly,
    /// Monthly payments (12 per year)
    Monthly,
}

impl Frequency {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Frequency::Annual => 1,
            Frequency::SemiAnnual => 2,
            Frequency::Quarterly => 4,
            Frequency::Monthly => 12,
        }
    }

    /// Returns the length of one period in years.
    #[must_use]
    pub fn period_length(&self) -> f64 {
        1.0 / f64::from(self.periods_per_year())
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
        };
        write!(f, "{name}")
    }
}

const fn non_zero(n: u32) -> NonZeroU32 {
    match NonZeroU32::new(n) {
        Some(v) => v,
        None => panic!("compounding frequency must be non-zero"),
    }
}

/// Interest compounding convention.
///
/// Either a positive whole number of compounding periods per year, or
/// continuous compounding. A zero or fractional frequency cannot be
/// represented; use [`Compounding::periodic`] or
/// [`Compounding::from_frequency`] to validate raw inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CompoundingSpec", into = "CompoundingSpec")]
pub struct Compounding {
    /// `None` encodes continuous compounding.
    periods_per_year: Option<NonZeroU32>,
}

impl Compounding {
    /// Continuous compounding.
    pub const CONTINUOUS: Self = Self {
        periods_per_year: None,
    };
    /// Annual compounding (1x per year).
    pub const ANNUAL: Self = Self {
        periods_per_year: Some(non_zero(1)),
    };
    /// Semi-annual compounding (2x per year).
    pub const SEMI_ANNUAL: Self = Self {
        periods_per_year: Some(non_zero(2)),
    };
    /// Quarterly compounding (4x per year).
    pub const QUARTERLY: Self = Self {
        periods_per_year: Some(non_zero(4)),
    };
    /// Monthly compounding (12x per year).
    pub const MONTHLY: Self = Self {
        periods_per_year: Some(non_zero(12)),
    };

    /// Creates a discrete compounding convention.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidFrequency`] if `periods_per_year` is zero.
    pub fn periodic(periods_per_year: u32) -> CoreResult<Self> {
        NonZeroU32::new(periods_per_year)
            .map(|n| Self {
                periods_per_year: Some(n),
            })
            .ok_or_else(|| CoreError::invalid_frequency(f64::from(periods_per_year)))
    }

    /// Creates a compounding convention from a raw frequency.
    ///
    /// `f64::INFINITY` is the sentinel for continuous compounding; any other
    /// value must be a positive whole number.
    pub fn from_frequency(frequency: f64) -> CoreResult<Self> {
        if frequency == f64::INFINITY {
            return Ok(Self::CONTINUOUS);
        }
        if !frequency.is_finite()
            || frequency < 1.0
            || frequency.fract() != 0.0
            || frequency > f64::from(u32::MAX)
        {
            return Err(CoreError::invalid_frequency(frequency));
        }
        Self::periodic(frequency as u32)
    }

    /// Returns the number of compounding periods per year, or `None` for
    /// continuous compounding.
    #[must_use]
    pub fn periods_per_year(&self) -> Option<u32> {
        self.periods_per_year.map(NonZeroU32::get)
    }

    /// Returns true if this is continuous compounding.
    #[must_use]
    pub fn is_continuous(&self) -> bool {
        self.periods_per_year.is_none()
    }

    /// Discount factor for a rate held over `t` years.
    ///
    /// - Continuous: `exp(-r t)`
    /// - Periodic: `(1 + r/f)^(-f t)`
    #[must_use]
    pub fn discount_factor(&self, rate: f64, t: f64) -> f64 {
        if t == 0.0 {
            return 1.0;
        }
        match self.periods_per_year() {
            None => (-rate * t).exp(),
            Some(n) => {
                let f = f64::from(n);
                (1.0 + rate / f).powf(-f * t)
            }
        }
    }

    /// Zero rate implied by a discount factor at `t` years.
    ///
    /// The caller guarantees `t > 0` and `df > 0`.
    #[must_use]
    pub fn zero_rate(&self, df: f64, t: f64) -> f64 {
        match self.periods_per_year() {
            None => -df.ln() / t,
            Some(n) => {
                let f = f64::from(n);
                f * (df.powf(-1.0 / (f * t)) - 1.0)
            }
        }
    }
}

impl Default for Compounding {
    fn default() -> Self {
        Self::SEMI_ANNUAL
    }
}

impl From<Frequency> for Compounding {
    fn from(freq: Frequency) -> Self {
        match freq {
            Frequency::Annual => Compounding::ANNUAL,
            Frequency::SemiAnnual => Compounding::SEMI_ANNUAL,
            Frequency::Quarterly => Compounding::QUARTERLY,
            Frequency::Monthly => Compounding::MONTHLY,
        }
    }
}

impl fmt::Display for Compounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.periods_per_year() {
            None => write!(f, "Continuous"),
            Some(1) => write!(f, "Annual"),
            Some(2) => write!(f, "Semi-Annual"),
            Some(4) => write!(f, "Quarterly"),
            Some(12) => write!(f, "Monthly"),
            Some(n) => write!(f, "{n}x per year"),
        }
    }
}

/// Serialized form of [`Compounding`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum CompoundingSpec {
    Continuous,
    Periodic(u32),
}

impl TryFrom<CompoundingSpec> for Compounding {
    type Error = CoreError;

    fn try_from(spec: CompoundingSpec) -> Result<Self, Self::Error> {
        match spec {
            CompoundingSpec::Continuous => Ok(Compounding::CONTINUOUS),
            CompoundingSpec::Periodic(n) => Compounding::periodic(n),
        }
    }
}

impl From<Compounding> for CompoundingSpec {
    fn from(compounding: Compounding) -> Self {
        match compounding.periods_per_year() {
            None => CompoundingSpec::Continuous,
            Some(n) => CompoundingSpec::Periodic(n),
        }
    }
}
