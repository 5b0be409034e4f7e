//! Bootstrap command implementation.
//!
//! Solves for the discount factors implied by a full ladder of Treasury
//! notes.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;

use strata_core::Compounding;
use strata_curves::bootstrap::Bootstrapper;
use strata_curves::report::TermStructureReport;

use crate::cli::OutputFormat;
use crate::commands::{load_notes, portfolio_of, CompoundingChoice, CurveRow};
use crate::config::Settings;
use crate::output::{print_header, print_json, print_output};

/// Arguments for the bootstrap command.
#[derive(Args, Debug)]
pub struct BootstrapArgs {
    /// CSV file with columns: maturity,coupon,price,yield
    pub file: PathBuf,

    /// Compounding for reported zero and forward rates
    #[arg(long, value_enum, default_value = "continuous")]
    pub compounding: CompoundingChoice,
}

/// Execute the bootstrap command.
pub fn execute(args: &BootstrapArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let notes = load_notes(&args.file, &settings.solver)?;
    let portfolio = portfolio_of(&notes);
    info!(notes = notes.len(), file = %args.file.display(), "bootstrapping");

    let result = Bootstrapper::default().bootstrap(&portfolio)?;
    let compounding: Compounding = args.compounding.into();
    let report = TermStructureReport::from_curve(&result.curve, compounding)?;

    if format == OutputFormat::Json {
        return print_json(&report);
    }
    if format == OutputFormat::Table {
        print_header(&format!("Bootstrapped Curve ({compounding})"));
    }
    let rows: Vec<CurveRow> = report.points.iter().map(CurveRow::from).collect();
    print_output(&rows, format)?;

    Ok(())
}
