//! Short-rate models that grow a rate tree one column at a time.
//!
//! Both models move up with probability ½ and down with probability ½ from
//! every node, shifted by a per-period drift `θ_j` chosen during
//! calibration:
//!
//! - **Ho-Lee** (additive): `r(0,j) = r(0,j-1) + θ dt + σ√dt`,
//!   `r(i,j) = r(i-1,j-1) + θ dt - σ√dt`
//! - **Black-Derman-Toy** (multiplicative): the same recursion applied to
//!   the rate through `exp(θ dt ± σ√dt)`, keeping rates positive

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tree::RateTree;

/// A one-factor short-rate model on a recombining binomial tree.
pub trait ShortRateModel: fmt::Debug + Send + Sync {
    /// Model name.
    fn name(&self) -> &'static str;

    /// Short-rate volatility: absolute for additive models, proportional
    /// for multiplicative ones.
    fn volatility(&self) -> f64;

    /// Writes column `j` of `rates` from column `j - 1` under drift `theta`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= j < rates.columns()`.
    fn fill_column(&self, rates: &mut RateTree, j: usize, theta: f64, time_step: f64);
}

/// Ho-Lee model: normal short rate with constant volatility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoLee {
    /// Absolute volatility of the short rate.
    pub sigma: f64,
}

impl HoLee {
    /// Creates a Ho-Lee model.
    #[must_use]
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }
}

impl ShortRateModel for HoLee {
    fn name(&self) -> &'static str {
        "Ho-Lee"
    }

    fn volatility(&self) -> f64 {
        self.sigma
    }

    fn fill_column(&self, rates: &mut RateTree, j: usize, theta: f64, time_step: f64) {
        assert!(j >= 1, "column 0 holds the initial short rate");
        let drift = theta * time_step;
        let shock = self.sigma * time_step.sqrt();

        let top = rates.get(0, j - 1) + drift + shock;
        rates.set(0, j, top);
        for i in 1..=j {
            let rate = rates.get(i - 1, j - 1) + drift - shock;
            rates.set(i, j, rate);
        }
    }
}

/// Black-Derman-Toy model: lognormal short rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlackDermanToy {
    /// Proportional volatility of the short rate.
    pub sigma: f64,
}

impl BlackDermanToy {
    /// Creates a Black-Derman-Toy model.
    #[must_use]
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }
}

impl ShortRateModel for BlackDermanToy {
    fn name(&self) -> &'static str {
        "Black-Derman-Toy"
    }

    fn volatility(&self) -> f64 {
        self.sigma
    }

    fn fill_column(&self, rates: &mut RateTree, j: usize, theta: f64, time_step: f64) {
        assert!(j >= 1, "column 0 holds the initial short rate");
        let drift = theta * time_step;
        let shock = self.sigma * time_step.sqrt();
        let up = (drift + shock).exp();
        let down = (drift - shock).exp();

        let top = rates.get(0, j - 1) * up;
        rates.set(0, j, top);
        for i in 1..=j {
            let rate = rates.get(i - 1, j - 1) * down;
            rates.set(i, j, rate);
        }
    }
}

/// Selects a short-rate model by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Ho-Lee.
    #[default]
    HoLee,
    /// Black-Derman-Toy.
    #[serde(alias = "bdt")]
    BlackDermanToy,
}

impl ModelKind {
    /// Builds the model with the given volatility.
    #[must_use]
    pub fn with_volatility(self, sigma: f64) -> Box<dyn ShortRateModel> {
        match self {
            ModelKind::HoLee => Box::new(HoLee::new(sigma)),
            ModelKind::BlackDermanToy => Box::new(BlackDermanToy::new(sigma)),
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelKind::HoLee => write!(f, "Ho-Lee"),
            ModelKind::BlackDermanToy => write!(f, "Black-Derman-Toy"),
        }
    }
}
