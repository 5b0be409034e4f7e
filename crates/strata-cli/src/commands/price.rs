//! Price command implementation.
//!
//! Prices a Treasury note from its yield, or solves for the yield from a
//! price, and reports duration, convexity and the approximate price move
//! for a yield shift.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use strata_bonds::instruments::TreasuryNote;
use strata_bonds::Instrument;

use crate::cli::OutputFormat;
use crate::commands::QuoteRecord;
use crate::config::Settings;
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Annual coupon rate (as percentage, e.g., 4.75 for 4.75%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Years to maturity, in half-year steps
    #[arg(short, long)]
    pub maturity: f64,

    /// Annual yield (as percentage). If provided, calculates price.
    #[arg(short, long = "yield", group = "calc_mode")]
    pub yield_value: Option<f64>,

    /// Price per 100 face. If provided, calculates yield.
    #[arg(short, long, group = "calc_mode")]
    pub price: Option<f64>,

    /// Annual yield shift in basis points for the price-change estimate
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub shift_bps: f64,
}

/// Pricing and risk figures for one note.
#[derive(Debug, Clone, Serialize)]
pub struct PriceReport {
    /// Annual coupon rate.
    pub coupon_rate: f64,
    /// Years to maturity.
    pub maturity_years: f64,
    /// Annual yield.
    pub annual_yield: f64,
    /// Price per 100 face.
    pub price: f64,
    /// Macaulay duration in years.
    pub macaulay_duration: f64,
    /// Modified duration with respect to the annual yield.
    pub modified_duration: f64,
    /// Convexity with respect to the annual yield.
    pub convexity: f64,
    /// Yield shift used for the estimates, in basis points.
    pub shift_bps: f64,
    /// Duration-only price change estimate.
    pub price_change_duration: f64,
    /// Duration plus convexity price change estimate.
    pub price_change_convexity: f64,
}

impl PriceReport {
    /// Collects the report for `note` under an annual yield shift of
    /// `shift_bps`.
    pub fn of(note: &TreasuryNote, shift_bps: f64) -> Self {
        // Risk figures come per semi-annual period.
        let per_period_shift = shift_bps / 10_000.0 / 2.0;
        Self {
            coupon_rate: note.coupon_rate(),
            maturity_years: note.maturity_years(),
            annual_yield: note.annual_ytm(),
            price: note.price(),
            macaulay_duration: note.duration(),
            modified_duration: note.modified_duration() / 2.0,
            convexity: note.convexity() / 4.0,
            shift_bps,
            price_change_duration: note.price_change(per_period_shift, false),
            price_change_convexity: note.price_change(per_period_shift, true),
        }
    }

    fn rows(&self) -> Vec<KeyValue> {
        vec![
            KeyValue::from_percent("Coupon", self.coupon_rate),
            KeyValue::from_f64("Maturity (years)", self.maturity_years, 2),
            KeyValue::from_percent("Yield", self.annual_yield),
            KeyValue::from_f64("Price", self.price, 6),
            KeyValue::from_f64("Macaulay Duration", self.macaulay_duration, 4),
            KeyValue::from_f64("Modified Duration", self.modified_duration, 4),
            KeyValue::from_f64("Convexity", self.convexity, 4),
            KeyValue::new("Yield Shift", format!("{:+.1} bps", self.shift_bps)),
            KeyValue::from_f64("Price Change (duration)", self.price_change_duration, 6),
            KeyValue::from_f64("Price Change (+convexity)", self.price_change_convexity, 6),
        ]
    }
}

/// Execute the price command.
pub fn execute(args: &PriceArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    // Default: price at par (yield = coupon)
    let quote = QuoteRecord {
        maturity: args.maturity,
        coupon: args.coupon,
        price: args.price,
        yield_pct: args.yield_value.or(args.price.is_none().then_some(args.coupon)),
    };
    let note = quote.to_note(1, &settings.solver)?;
    let report = PriceReport::of(&note, args.shift_bps);

    match format {
        OutputFormat::Table => {
            print_header("Treasury Note Pricing");
            print_output(&report.rows(), format)?;
        }
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_output(&report.rows(), format)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_report_units() {
        let note = TreasuryNote::new(0.05, 2.0, 0.05).unwrap();
        let report = PriceReport::of(&note, 100.0);

        assert_relative_eq!(report.price, 100.0, epsilon = 1e-10);
        assert_relative_eq!(report.macaulay_duration, note.macaulay_duration() / 2.0);
        assert_relative_eq!(
            report.macaulay_duration / 1.025,
            report.modified_duration,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            report.price_change_duration,
            -report.modified_duration * report.price * 0.01,
            epsilon = 1e-10
        );
        assert!(report.price_change_convexity > report.price_change_duration);
    }
}
