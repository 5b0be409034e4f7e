//! Tree command implementation.
//!
//! Calibrates a short-rate tree to a zero curve, either bootstrapped from
//! note quotes or given directly as zero prices, and optionally prices a
//! bullet or callable bond on it.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use strata_curves::bootstrap::Bootstrapper;
use strata_lattice::calibration::{CalibratedTree, TreeCalibrator};
use strata_lattice::models::ModelKind;
use strata_lattice::pricing::{BondSpec, CallableValue};

use crate::cli::OutputFormat;
use crate::commands::{load_notes, parse_list, portfolio_of};
use crate::config::Settings;
use crate::error::CliError;
use crate::output::{print_header, print_json, print_output, print_warning, KeyValue};

/// Arguments for the tree command.
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// CSV file of note quotes to bootstrap the target curve from
    #[arg(required_unless_present = "zeros")]
    pub file: Option<PathBuf>,

    /// Target zero prices maturing at dt, 2dt, ... (comma-separated)
    #[arg(long, conflicts_with = "file")]
    pub zeros: Option<String>,

    /// Short-rate model
    #[arg(short, long, value_enum, default_value = "ho-lee")]
    pub model: TreeModel,

    /// Short-rate volatility (absolute for Ho-Lee, proportional for BDT)
    #[arg(short, long, default_value = "0.01")]
    pub sigma: f64,

    /// Step length in years (overrides the settings file)
    #[arg(long)]
    pub time_step: Option<f64>,

    /// Number of periods to calibrate. Defaults to the whole curve.
    #[arg(long)]
    pub periods: Option<usize>,

    /// Annual coupon (as percentage) of a bond maturing at the last step to
    /// price on the tree
    #[arg(long)]
    pub bond_coupon: Option<f64>,

    /// Call price making the bond callable
    #[arg(long, requires = "bond_coupon")]
    pub call_price: Option<f64>,

    /// First step at which the bond may be called
    #[arg(long, default_value = "0")]
    pub lockout: usize,
}

/// Short-rate model choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum TreeModel {
    /// Ho-Lee (additive)
    #[default]
    HoLee,
    /// Black-Derman-Toy (lognormal)
    #[value(name = "bdt", alias = "black-derman-toy")]
    BlackDermanToy,
}

impl From<TreeModel> for ModelKind {
    fn from(model: TreeModel) -> Self {
        match model {
            TreeModel::HoLee => ModelKind::HoLee,
            TreeModel::BlackDermanToy => ModelKind::BlackDermanToy,
        }
    }
}

/// Fit of one period.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct StepRow {
    #[tabled(rename = "Step")]
    pub step: usize,
    #[tabled(rename = "Maturity")]
    pub maturity: f64,
    #[tabled(rename = "Theta", display_with = "display_optional")]
    pub theta: Option<f64>,
    #[tabled(rename = "Target Zero", display_with = "display_price")]
    pub target: f64,
    #[tabled(rename = "Tree Zero", display_with = "display_price")]
    pub fitted: f64,
    #[tabled(rename = "Squared Error", display_with = "display_optional_sci")]
    pub error: Option<f64>,
}

/// A bond priced on the calibrated tree.
#[derive(Debug, Clone, Serialize)]
pub struct BondReport {
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Maturity step.
    pub maturity_steps: usize,
    /// Price per 100 face without any call.
    pub price: f64,
    /// Callable breakdown, when a call price was given.
    pub callable: Option<CallableValue>,
}

/// Calibration summary, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct TreeReport {
    /// Model name.
    pub model: String,
    /// Model volatility.
    pub sigma: f64,
    /// Step length in years.
    pub time_step: f64,
    /// Per-period fit.
    pub steps: Vec<StepRow>,
    /// Mean absolute zero-price error.
    pub mean_absolute_error: f64,
    /// Sum of squared errors.
    pub total_error: f64,
    /// Largest squared error.
    pub max_error: f64,
    /// Bond priced on the tree.
    pub bond: Option<BondReport>,
}

impl TreeReport {
    /// Summarizes a calibrated tree.
    pub fn from_tree(tree: &CalibratedTree) -> Self {
        let steps = (0..tree.periods())
            .map(|k| StepRow {
                step: k + 1,
                maturity: (k + 1) as f64 * tree.time_step,
                theta: k.checked_sub(1).map(|p| tree.thetas[p]),
                target: tree.targets[k],
                fitted: tree.fitted_zeros[k],
                error: k.checked_sub(1).map(|p| tree.errors[p]),
            })
            .collect();
        Self {
            model: tree.model.clone(),
            sigma: tree.volatility,
            time_step: tree.time_step,
            steps,
            mean_absolute_error: tree.mean_absolute_error(),
            total_error: tree.total_error(),
            max_error: tree.max_error(),
            bond: None,
        }
    }
}

/// Execute the tree command.
pub fn execute(args: &TreeArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let mut config = settings.calibration;
    if let Some(time_step) = args.time_step {
        config.time_step = time_step;
    }
    let calibrator = TreeCalibrator::new(config);
    let model = ModelKind::from(args.model).with_volatility(args.sigma);

    let tree = if let Some(zeros) = &args.zeros {
        let mut zeros = parse_list(zeros)?;
        if let Some(periods) = args.periods {
            if periods > zeros.len() {
                return Err(CliError::InvalidArgument(format!(
                    "{periods} periods requested but only {} zero prices given",
                    zeros.len()
                ))
                .into());
            }
            zeros.truncate(periods);
        }
        calibrator.calibrate(model.as_ref(), &zeros)?
    } else if let Some(file) = &args.file {
        let notes = load_notes(file, &settings.solver)?;
        let curve = Bootstrapper::default().bootstrap(&portfolio_of(&notes))?.curve;
        let periods = args
            .periods
            .unwrap_or_else(|| (curve.max_tenor() / config.time_step + 1e-9).floor() as usize);
        calibrator.calibrate_to_curve(model.as_ref(), &curve, periods)?
    } else {
        return Err(CliError::InvalidArgument("give a quote file or --zeros".to_string()).into());
    };

    let mut report = TreeReport::from_tree(&tree);
    if let Some(coupon) = args.bond_coupon {
        let pricer = tree.pricer();
        let bond = BondSpec::new(100.0, coupon / 100.0, tree.rates.columns());
        let price = pricer.bond_price(&bond)?;
        let callable = args
            .call_price
            .map(|call_price| pricer.callable_bond(&bond, call_price, args.lockout))
            .transpose()?;
        report.bond = Some(BondReport {
            coupon_rate: bond.coupon_rate,
            maturity_steps: bond.maturity_steps,
            price,
            callable,
        });
    }

    let poor = tree.poorly_fitted(config.tolerance);
    if !poor.is_empty() {
        print_warning(&format!(
            "{} of {} periods fitted above tolerance {:.1e}; largest squared error {:.3e}",
            poor.len(),
            tree.thetas.len(),
            config.tolerance,
            report.max_error
        ));
    }

    match format {
        OutputFormat::Table => {
            print_header(&format!("{} Tree (sigma {}, dt {})", report.model, report.sigma, report.time_step));
            print_output(&report.steps, format)?;
            print_output(&summary_rows(&report), format)?;
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_output(&report.steps, format)?,
    }

    Ok(())
}

fn summary_rows(report: &TreeReport) -> Vec<KeyValue> {
    let mut rows = vec![
        KeyValue::new("Mean Absolute Error", format!("{:.3e}", report.mean_absolute_error)),
        KeyValue::new("Total Squared Error", format!("{:.3e}", report.total_error)),
        KeyValue::new("Max Squared Error", format!("{:.3e}", report.max_error)),
    ];
    if let Some(bond) = &report.bond {
        rows.push(KeyValue::from_f64("Bond Price", bond.price, 6));
        if let Some(callable) = &bond.callable {
            rows.push(KeyValue::from_f64("Call Option", callable.call, 6));
            rows.push(KeyValue::from_f64("Callable Bond Price", callable.callable, 6));
        }
    }
    rows
}

fn display_price(value: &f64) -> String {
    format!("{value:.8}")
}

fn display_optional(value: &Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.6}"))
}

fn display_optional_sci(value: &Option<f64>) -> String {
    value.map_or_else(String::new, |v| format!("{v:.2e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_lattice::models::HoLee;

    #[test]
    fn test_report_rows_align_with_periods() {
        let zeros: Vec<f64> = (1..=4).map(|k| (-0.05 * 0.5 * f64::from(k)).exp()).collect();
        let tree = TreeCalibrator::default().calibrate(&HoLee::new(0.01), &zeros).unwrap();
        let report = TreeReport::from_tree(&tree);

        assert_eq!(report.steps.len(), 4);
        assert_eq!(report.steps[0].theta, None);
        assert_eq!(report.steps[0].error, None);
        assert_eq!(report.steps[3].theta, Some(tree.thetas[2]));
        assert_eq!(report.steps[3].maturity, 2.0);
        assert!(report.max_error < 1e-14);
    }
}
