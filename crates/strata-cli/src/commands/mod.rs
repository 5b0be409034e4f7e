//! CLI command implementations.

pub mod bootstrap;
pub mod fit;
pub mod price;
pub mod tree;

pub use bootstrap::BootstrapArgs;
pub use fit::FitArgs;
pub use price::PriceArgs;
pub use tree::TreeArgs;

use std::path::Path;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use strata_bonds::instruments::TreasuryNote;
use strata_bonds::portfolio::Portfolio;
use strata_core::Compounding;
use strata_curves::report::{TermStructurePoint, TermStructureReport};
use strata_curves::DiscountCurve;
use strata_math::solvers::SolverConfig;

use crate::error::{CliError, CliResult};

/// One row of a quote file: a Treasury note with either a price or a yield.
///
/// ```text
/// maturity,coupon,price,yield
/// 0.5,5.0,,4.0
/// 1.0,5.0,100.95,
/// ```
///
/// Maturity is in years; coupon and yield are annual percentages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuoteRecord {
    /// Years to maturity.
    pub maturity: f64,
    /// Annual coupon rate in percent.
    pub coupon: f64,
    /// Price per 100 face.
    #[serde(default)]
    pub price: Option<f64>,
    /// Annual yield in percent.
    #[serde(default, rename = "yield")]
    pub yield_pct: Option<f64>,
}

impl QuoteRecord {
    /// Builds the quoted note, solving for its yield when only a price is
    /// given.
    pub fn to_note(&self, line: usize, solver: &SolverConfig) -> CliResult<TreasuryNote> {
        let coupon_rate = self.coupon / 100.0;
        let note = match (self.yield_pct, self.price) {
            (Some(yield_pct), _) => TreasuryNote::new(coupon_rate, self.maturity, yield_pct / 100.0),
            (None, Some(price)) => TreasuryNote::from_price(price, coupon_rate, self.maturity, solver),
            (None, None) => return Err(CliError::invalid_quote(line, "needs a price or a yield")),
        };
        note.map_err(|e| CliError::invalid_quote(line, e.to_string()))
    }
}

/// Reads every quote in a CSV file.
pub fn read_quotes(path: &Path) -> CliResult<Vec<QuoteRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let quotes = reader
        .deserialize()
        .collect::<Result<Vec<QuoteRecord>, _>>()?;
    if quotes.is_empty() {
        return Err(CliError::NoQuotes(path.to_path_buf()));
    }
    Ok(quotes)
}

/// Reads a quote file into Treasury notes.
pub fn load_notes(path: &Path, solver: &SolverConfig) -> CliResult<Vec<TreasuryNote>> {
    read_quotes(path)?
        .iter()
        .enumerate()
        .map(|(idx, quote)| quote.to_note(idx + 2, solver))
        .collect()
}

/// Collects notes into a portfolio.
pub fn portfolio_of(notes: &[TreasuryNote]) -> Portfolio {
    notes
        .iter()
        .fold(Portfolio::new(), |portfolio, note| portfolio.with(*note))
}

/// Parses a comma-separated list of numbers.
pub fn parse_list(s: &str) -> CliResult<Vec<f64>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<f64>()
                .map_err(|_| CliError::InvalidArgument(format!("not a number: {part}")))
        })
        .collect()
}

/// Compounding convention choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum CompoundingChoice {
    /// Continuous compounding
    #[default]
    Continuous,
    /// Once a year
    Annual,
    /// Twice a year
    #[value(name = "semi-annual")]
    SemiAnnual,
    /// Four times a year
    Quarterly,
    /// Twelve times a year
    Monthly,
}

impl From<CompoundingChoice> for Compounding {
    fn from(choice: CompoundingChoice) -> Self {
        match choice {
            CompoundingChoice::Continuous => Compounding::CONTINUOUS,
            CompoundingChoice::Annual => Compounding::ANNUAL,
            CompoundingChoice::SemiAnnual => Compounding::SEMI_ANNUAL,
            CompoundingChoice::Quarterly => Compounding::QUARTERLY,
            CompoundingChoice::Monthly => Compounding::MONTHLY,
        }
    }
}

/// One maturity of a term-structure table.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct CurveRow {
    #[tabled(rename = "Maturity")]
    pub maturity: f64,
    #[tabled(rename = "Discount Factor", display_with = "display_discount")]
    pub discount_factor: f64,
    #[tabled(rename = "Zero Rate", display_with = "display_percent")]
    pub zero_rate: f64,
    #[tabled(rename = "Forward Rate", display_with = "display_percent")]
    pub forward_rate: f64,
}

impl From<&TermStructurePoint> for CurveRow {
    fn from(point: &TermStructurePoint) -> Self {
        Self {
            maturity: point.maturity,
            discount_factor: point.discount_factor,
            zero_rate: point.zero_rate,
            forward_rate: point.forward_rate,
        }
    }
}

/// Term-structure rows of `curve` at `maturities`.
pub fn curve_rows(
    curve: &DiscountCurve,
    maturities: &[f64],
    compounding: Compounding,
) -> anyhow::Result<Vec<CurveRow>> {
    let report = TermStructureReport::at_maturities(curve, maturities, compounding)?;
    Ok(report.points.iter().map(CurveRow::from).collect())
}

fn display_discount(value: &f64) -> String {
    format!("{value:.8}")
}

fn display_percent(value: &f64) -> String {
    format!("{:.4}%", value * 100.0)
}
