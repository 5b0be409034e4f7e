//! Property-based tests for bond valuation invariants.
//!
//! - Yield-to-maturity round trip: `ytm(price(y)) == y`
//! - Par property: coupon rate equal to yield prices at face
//! - Zero-coupon duration equals the period count

use approx::assert_relative_eq;
use proptest::prelude::*;

use strata_bonds::prelude::*;
use strata_math::solvers::SolverConfig;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn ytm_round_trip(
        ytm in -0.5f64..3.0,
        periods in 1u32..=60,
        coupon in 0.0f64..10.0,
    ) {
        let bond = CouponBond::new(100.0, coupon, periods, ytm).unwrap();
        let solved = CouponBond::from_price(
            bond.price(),
            100.0,
            coupon,
            periods,
            &SolverConfig::default(),
        )
        .unwrap();

        prop_assert!((solved.ytm() - ytm).abs() < 1e-8, "solved {} for {}", solved.ytm(), ytm);
    }

    #[test]
    fn zero_ytm_round_trip_at_tiny_prices(ytm in 0.5f64..25.0, periods in 20u32..=200) {
        let zero = ZeroCouponBond::new(100.0, periods, ytm).unwrap();
        let solved = yield_to_maturity(zero.price(), 100.0, 0.0, periods, &SolverConfig::default())
            .unwrap();

        prop_assert!((solved - ytm).abs() < 1e-8 * ytm, "solved {} for {}", solved, ytm);
    }

    #[test]
    fn par_bond_prices_at_face(
        ytm in 0.0f64..0.2,
        periods in 0u32..=60,
        face in 1.0f64..1_000.0,
    ) {
        let bond = CouponBond::new(face, ytm * face, periods, ytm).unwrap();
        prop_assert!((bond.price() - face).abs() < 1e-9 * face);
    }

    #[test]
    fn zero_duration_is_period_count(periods in 0u32..=100, ytm in -0.5f64..1.0) {
        let zero = ZeroCouponBond::new(100.0, periods, ytm).unwrap();
        prop_assert_eq!(zero.macaulay_duration(), f64::from(periods));
    }
}

#[test]
fn test_heterogeneous_instruments_share_trait() {
    let instruments: Vec<Box<dyn Instrument>> = vec![
        Box::new(CouponBond::new(100.0, 5.0, 4, 0.05).unwrap()),
        Box::new(ZeroCouponBond::new(100.0, 4, 0.05).unwrap()),
        Box::new(Perpetuity::new(5.0, 0.05).unwrap()),
        Box::new(TreasuryNote::new(0.1, 2.0, 0.1).unwrap()),
    ];

    let kinds: Vec<InstrumentKind> = instruments.iter().map(|i| i.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            InstrumentKind::CouponBond,
            InstrumentKind::ZeroCouponBond,
            InstrumentKind::Perpetuity,
            InstrumentKind::TreasuryNote,
        ]
    );

    for instrument in &instruments {
        let metrics = RiskMetrics::of(instrument.as_ref());
        assert!(metrics.price > 0.0);
        assert_relative_eq!(
            metrics.modified_duration,
            metrics.macaulay_duration / (1.0 + instrument.ytm()),
            epsilon = 1e-12
        );
    }
}

#[test]
fn test_price_change_tracks_repricing() {
    let bond = CouponBond::new(100.0, 7.0, 10, 0.07).unwrap();
    let shifted = bond.with_ytm(0.08).unwrap();
    let actual = shifted.price() - bond.price();

    let first_order = bond.price_change(0.01, false);
    let second_order = bond.price_change(0.01, true);

    assert!((second_order - actual).abs() < (first_order - actual).abs());
}

#[test]
fn test_schedule_serializes() {
    let bond = CouponBond::new(100.0, 2.5, 2, 0.02).unwrap();
    let json = serde_json::to_string(&bond.cashflows().unwrap()).unwrap();
    assert_eq!(
        json,
        r#"{"flows":[{"period":1,"amount":2.5},{"period":2,"amount":102.5}]}"#
    );
}
