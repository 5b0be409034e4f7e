//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BootstrapArgs, FitArgs, PriceArgs, TreeArgs};

/// Strata - term-structure construction and short-rate lattice calibration
#[derive(Parser)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// TOML settings file with [solver], [optimizer] and [calibration] sections
    #[arg(long, global = true, env = "STRATA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log calibration and fitting progress (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Price a Treasury note from its yield, or its yield from a price
    Price(PriceArgs),

    /// Bootstrap discount factors and zero rates from note quotes
    Bootstrap(BootstrapArgs),

    /// Fit a Nelson-Siegel or Vasicek curve to note quotes
    Fit(FitArgs),

    /// Calibrate a Ho-Lee or Black-Derman-Toy tree to a zero curve
    Tree(TreeArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
