//! Numerical settings loaded from an optional TOML file.
//!
//! ```toml
//! [solver]
//! tolerance = 1e-12
//! max_iterations = 100
//!
//! [optimizer]
//! max_iterations = 10000
//!
//! [calibration]
//! time_step = 0.25
//! tolerance = 1e-12
//! ```
//!
//! Missing sections and keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use strata_lattice::calibration::CalibratorConfig;
use strata_math::optimization::OptimizationConfig;
use strata_math::solvers::SolverConfig;

use crate::error::{CliError, CliResult};

/// Settings shared by all commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Yield solver used for price-to-yield conversion.
    pub solver: SolverConfig,
    /// Nelder-Mead settings for parametric fits.
    pub optimizer: OptimizationConfig,
    /// Tree calibration settings.
    pub calibration: CalibratorConfig,
}

impl Settings {
    /// Loads settings from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|reason| CliError::Config {
            path: path.to_path_buf(),
            reason,
        })
    }

    fn from_toml(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }
}
