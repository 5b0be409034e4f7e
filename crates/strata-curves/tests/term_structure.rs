//! End-to-end curve construction: bootstrap, report, fit and stitch.

use approx::assert_relative_eq;

use strata_bonds::prelude::*;
use strata_core::Compounding;
use strata_curves::prelude::*;

fn treasury_ladder(coupon_rate: f64, annual_ytm: f64, years: f64) -> Portfolio {
    let steps = (years * 2.0) as u32;
    (1..=steps).fold(Portfolio::new(), |portfolio, k| {
        portfolio.with(TreasuryNote::new(coupon_rate, f64::from(k) / 2.0, annual_ytm).unwrap())
    })
}

#[test]
fn bootstrap_ten_percent_notes() {
    let portfolio = treasury_ladder(0.1, 0.1, 2.0);
    let zeros = bootstrap(&portfolio).unwrap();

    assert_eq!(zeros.len(), 4);
    for zero in &zeros {
        assert_relative_eq!(zero.ytm(), 0.05, epsilon = 1e-10);
        assert_relative_eq!(
            zero.macaulay_duration(),
            f64::from(zero.period_count()),
            epsilon = 1e-12
        );
    }
}

#[test]
fn bootstrapped_curve_reprices_through_fitter_quotes() {
    let portfolio = treasury_ladder(0.06, 0.045, 5.0);
    let result = Bootstrapper::default().bootstrap(&portfolio).unwrap();

    for instrument in portfolio.iter() {
        let quote = FitQuote::from_schedule(
            Some(instrument.price()),
            &instrument.cashflows().unwrap(),
            0.5,
        );
        let repriced: f64 = quote
            .cashflows
            .iter()
            .map(|&(t, amount)| amount * result.curve.discount_factor(t).unwrap())
            .sum();
        assert_relative_eq!(repriced, instrument.price(), epsilon = 1e-9);
    }
}

#[test]
fn report_serializes_to_json() {
    let curve = DiscountCurve::new(vec![0.5, 1.0], vec![0.98, 0.955]).unwrap();
    let report = TermStructureReport::from_curve(&curve, Compounding::CONTINUOUS).unwrap();

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["compounding"], "continuous");
    assert_eq!(json["points"].as_array().unwrap().len(), 2);
    assert_relative_eq!(json["points"][1]["discount_factor"].as_f64().unwrap(), 0.955);
}

#[test]
fn fitted_long_end_stitched_to_bootstrapped_short_end() {
    let truth = Vasicek::new(0.05, 0.4, 0.03, 0.01);
    let quotes: Vec<FitQuote> = [2_u32, 6, 10, 20, 40]
        .iter()
        .map(|&periods| {
            let schedule = CashflowSchedule::bullet(100.0, 2.0, periods);
            let mut quote = FitQuote::from_schedule(None, &schedule, 0.5);
            quote.market_price = Some(quote.model_price(&truth));
            quote
        })
        .collect();

    let fit = CurveFitter::default().fit_vasicek(&quotes, None).unwrap();
    let long = fit.discount_curve(&[1.0, 2.0, 5.0, 10.0, 20.0]).unwrap();

    let short = Bootstrapper::default()
        .bootstrap(&treasury_ladder(0.03, 0.03, 1.0))
        .unwrap()
        .curve;

    let stitched = DiscountCurve::stitch(&short, &long, 1.0).unwrap();
    assert_eq!(stitched.tenors(), &[0.5, 1.0, 2.0, 5.0, 10.0, 20.0]);
    assert_relative_eq!(
        stitched.discount_factor(1.0).unwrap(),
        short.discount_factor(1.0).unwrap()
    );
    assert_relative_eq!(
        stitched.discount_factor(20.0).unwrap(),
        truth.discount_factor(20.0),
        epsilon = 1e-6
    );
}
