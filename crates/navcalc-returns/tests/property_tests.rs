//! Property-based tests for the valuation engine.
//!
//! These tests verify invariants that must hold for arbitrary input:
//! - SIP invested capital is the installment times the number of matches
//! - Same-day holding periods have a zero return
//! - A lump-sum over a single NAV returns exactly the amount invested
//! - Annualization agrees with the simple return below one year and is
//!   continuous across the one-year boundary
//! - No input makes a valuation panic

use navcalc_core::prelude::*;
use navcalc_returns::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

fn arb_date() -> impl Strategy<Value = Date> {
    (0i64..9_000).prop_map(|offset| Date::from_ymd(2005, 1, 1).unwrap().add_days(offset).unwrap())
}

fn arb_series() -> impl Strategy<Value = NavSeries> {
    prop::collection::vec((arb_date(), 1.0f64..1_000.0), 0..80).prop_map(NavSeries::from_pairs)
}

fn arb_cadence() -> impl Strategy<Value = Cadence> {
    prop_oneof![
        Just(Cadence::Monthly),
        Just(Cadence::Quarterly),
        Just(Cadence::HalfYearly),
        Just(Cadence::Yearly),
    ]
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn property_sip_invested_is_installment_times_matches(
        series in arb_series(),
        start in arb_date(),
        span in 0i64..3_000,
        amount in 1.0f64..100_000.0,
        cadence in arb_cadence(),
    ) {
        let end = start.add_days(span).unwrap();
        let outcome = compute_sip(&series, amount, cadence, start, end);

        match outcome {
            ValuationOutcome::Computed(v) => {
                let matched = generate_schedule(start, end, cadence)
                    .into_iter()
                    .filter(|d| series.resolve(*d).is_some())
                    .count();
                prop_assert_eq!(v.installments(), matched);
                let expected = amount * matched as f64;
                prop_assert!((v.total_invested - expected).abs() <= expected * 1e-12);
                prop_assert!(v.current_value > 0.0);
            }
            ValuationOutcome::NeedsReview(review) => {
                prop_assert!(series.is_empty());
                prop_assert_eq!(review.reason, ReviewReason::NoInstallments);
            }
        }
    }

    #[test]
    fn property_same_day_holding_return_is_zero(series in arb_series(), day in arb_date()) {
        match compute_holding_period_return(&series, day, day) {
            Some(r) => {
                prop_assert_eq!(r.simple_return_pct, 0.0);
                prop_assert_eq!(r.annualized_return_pct, 0.0);
            }
            None => prop_assert!(series.is_empty()),
        }
    }

    #[test]
    fn property_single_point_lumpsum_round_trip(
        day in arb_date(),
        nav in 0.5f64..5_000.0,
        amount in 1.0f64..1_000_000.0,
    ) {
        let series = NavSeries::from_pairs([(day, nav)]);
        let v = compute_lumpsum(&series, amount, day, day).into_result().unwrap();
        prop_assert!((v.current_value - amount).abs() <= amount * 1e-12);
        prop_assert!(v.absolute_return_pct.abs() < 1e-9);
    }

    #[test]
    fn property_sub_year_annualization_equals_simple(multiple in 0.01f64..10.0, days in 0i64..365) {
        prop_assert_eq!(annualize(multiple, days), (multiple - 1.0) * 100.0);
    }

    #[test]
    fn property_annualization_continuous_at_one_year(multiple in 0.5f64..2.0) {
        let below = annualize(multiple, 364);
        let above = annualize(multiple, 366);
        // CAGR over 366/365.25 years differs from the simple return only by
        // the fractional exponent.
        let bound = (multiple.ln().abs() * multiple * 100.0 * 0.01).max(1e-9);
        prop_assert!((below - above).abs() <= bound);
    }

    #[test]
    fn property_valuations_never_panic(
        series in arb_series(),
        a in arb_date(),
        b in arb_date(),
        amount in prop_oneof![Just(0.0), Just(-10.0), Just(f64::NAN), 1.0f64..10_000.0],
    ) {
        let _ = compute_sip(&series, amount, Cadence::Monthly, a, b);
        let _ = compute_lumpsum(&series, amount, a, b);
        let _ = compute_holding_period_return(&series, a, b);
        let _ = clamp_range_to_series(&series, a, b);
    }
}
