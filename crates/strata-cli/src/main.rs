//! Strata CLI - term-structure construction and short-rate trees from the
//! command line.
//!
//! # Usage
//!
//! ```bash
//! # Price a Treasury note from its yield
//! strata price --coupon 4.75 --maturity 9.5 --yield 3.7548
//!
//! # Bootstrap zero rates from a ladder of notes
//! strata bootstrap quotes.csv
//!
//! # Fit a Nelson-Siegel curve
//! strata fit quotes.csv --model nelson-siegel
//!
//! # Calibrate a Black-Derman-Toy tree to the bootstrapped curve
//! strata tree quotes.csv --model bdt --sigma 0.2
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if cli.verbose { "debug" } else { "warn" }));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)?,
        None => Settings::default(),
    };
    let format = cli.format;

    match cli.command {
        Commands::Price(args) => commands::price::execute(&args, &settings, format)?,
        Commands::Bootstrap(args) => commands::bootstrap::execute(&args, &settings, format)?,
        Commands::Fit(args) => commands::fit::execute(&args, &settings, format)?,
        Commands::Tree(args) => commands::tree::execute(&args, &settings, format)?,
    }

    Ok(())
}
