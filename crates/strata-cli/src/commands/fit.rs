//! Fit command implementation.
//!
//! Fits a parametric discount curve to Treasury note prices by minimizing
//! the squared pricing error.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use strata_bonds::Instrument;
use strata_curves::parametric::{CurveFitter, FitQuote, FitResult, ParametricModel};

use crate::cli::OutputFormat;
use crate::commands::{curve_rows, load_notes, parse_list, CompoundingChoice, CurveRow};
use crate::config::Settings;
use crate::output::{print_header, print_json, print_output, print_warning, KeyValue};

/// Semi-annual note cash flows.
const PERIOD_LENGTH: f64 = 0.5;

/// Arguments for the fit command.
#[derive(Args, Debug)]
pub struct FitArgs {
    /// CSV file with columns: maturity,coupon,price,yield
    pub file: PathBuf,

    /// Curve family to fit
    #[arg(short, long, value_enum, default_value = "nelson-siegel")]
    pub model: FitModel,

    /// Maturities to report (comma-separated years). Defaults to the quoted
    /// maturities.
    #[arg(long)]
    pub maturities: Option<String>,

    /// Compounding for reported zero and forward rates
    #[arg(long, value_enum, default_value = "continuous")]
    pub compounding: CompoundingChoice,
}

/// Parametric curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum FitModel {
    /// Nelson-Siegel level, slope and curvature
    #[default]
    NelsonSiegel,
    /// Vasicek affine short-rate curve
    Vasicek,
}

impl FitModel {
    fn name(self) -> &'static str {
        match self {
            FitModel::NelsonSiegel => "Nelson-Siegel",
            FitModel::Vasicek => "Vasicek",
        }
    }
}

/// A named fitted parameter.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct Parameter {
    #[tabled(rename = "Parameter")]
    pub name: &'static str,
    #[tabled(rename = "Value")]
    pub value: f64,
}

/// Result of a fit, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct FitReport {
    /// Curve family.
    pub model: String,
    /// Fitted parameters in model order.
    pub parameters: Vec<Parameter>,
    /// Sum of squared pricing errors.
    pub objective: f64,
    /// Optimizer iterations.
    pub iterations: u32,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
    /// Fitted curve at the reported maturities.
    pub curve: Vec<CurveRow>,
}

impl FitReport {
    fn from_fit<M: ParametricModel>(
        model: FitModel,
        fit: &FitResult<M>,
        maturities: &[f64],
        compounding: CompoundingChoice,
    ) -> Result<Self> {
        let names: [&'static str; 4] = match model {
            FitModel::NelsonSiegel => ["theta0", "theta1", "theta2", "kappa"],
            FitModel::Vasicek => ["eta", "gamma", "r0", "sigma"],
        };
        let curve = fit.discount_curve(maturities)?;
        Ok(Self {
            model: model.name().to_string(),
            parameters: names
                .iter()
                .zip(&fit.parameters)
                .map(|(&name, &value)| Parameter { name, value })
                .collect(),
            objective: fit.objective,
            iterations: fit.iterations,
            converged: fit.converged,
            curve: curve_rows(&curve, maturities, compounding.into())?,
        })
    }
}

/// Execute the fit command.
pub fn execute(args: &FitArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let notes = load_notes(&args.file, &settings.solver)?;
    let quotes = notes
        .iter()
        .map(|note| -> Result<FitQuote> {
            let schedule = note.cashflows()?;
            Ok(FitQuote::from_schedule(Some(note.price()), &schedule, PERIOD_LENGTH))
        })
        .collect::<Result<Vec<_>>>()?;

    let maturities = match &args.maturities {
        Some(list) => parse_list(list)?,
        None => {
            let mut maturities: Vec<f64> = notes.iter().map(|note| note.maturity_years()).collect();
            maturities.sort_by(f64::total_cmp);
            maturities.dedup();
            maturities
        }
    };

    let fitter = CurveFitter::new(settings.optimizer);
    let report = match args.model {
        FitModel::NelsonSiegel => {
            let fit = fitter.fit_nelson_siegel(&quotes, None)?;
            FitReport::from_fit(args.model, &fit, &maturities, args.compounding)?
        }
        FitModel::Vasicek => {
            let fit = fitter.fit_vasicek(&quotes, None)?;
            FitReport::from_fit(args.model, &fit, &maturities, args.compounding)?
        }
    };

    if !report.converged {
        print_warning(&format!(
            "optimizer stopped after {} iterations without meeting its tolerance",
            report.iterations
        ));
    }

    match format {
        OutputFormat::Table => {
            print_header(&format!("{} Fit", report.model));
            print_output(&report.parameters, format)?;
            print_output(
                &[
                    KeyValue::new("Pricing Error", format!("{:.6e}", report.objective)),
                    KeyValue::new("Iterations", report.iterations.to_string()),
                ],
                format,
            )?;
            print_header("Fitted Curve");
            print_output(&report.curve, format)?;
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_output(&report.curve, format)?,
    }

    Ok(())
}
