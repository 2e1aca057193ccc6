//! Property-based tests for series normalization, resolution and schedules.
//!
//! These tests verify invariants that must hold for arbitrary input:
//! - Normalized series are sorted and hold only finite positive NAVs
//! - Resolution never prefers a later NAV when an earlier one exists
//! - Schedules are strictly increasing, bounded, and keep the day-of-month

use navcalc_core::prelude::*;
use proptest::prelude::*;

// =============================================================================
// GENERATORS
// =============================================================================

/// Generates a date between 2000-01-01 and roughly 2035.
fn arb_date() -> impl Strategy<Value = Date> {
    (0i64..13_000).prop_map(|offset| {
        Date::from_ymd(2000, 1, 1)
            .unwrap()
            .add_days(offset)
            .unwrap()
    })
}

/// Generates a raw upstream record: mostly well formed, sometimes junk.
fn arb_raw_record() -> impl Strategy<Value = RawNavRecord> {
    let date = prop_oneof![
        4 => arb_date().prop_map(|d| d.to_dmy_string()),
        1 => "[0-9-]{0,12}",
    ];
    let nav = prop_oneof![
        4 => (0.01f64..10_000.0).prop_map(|v| format!("{v:.4}")),
        1 => prop_oneof![
            Just("N.A.".to_string()),
            Just("0".to_string()),
            Just("-12.5".to_string()),
            Just("NaN".to_string()),
            Just("inf".to_string()),
        ],
    ];
    (date, nav).prop_map(|(date, nav)| RawNavRecord::new(date, nav))
}

fn arb_series() -> impl Strategy<Value = NavSeries> {
    prop::collection::vec((arb_date(), 0.01f64..10_000.0), 1..60)
        .prop_map(NavSeries::from_pairs)
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
    fn property_normalized_series_is_sorted_and_valid(
        records in prop::collection::vec(arb_raw_record(), 0..80)
    ) {
        let series = NavSeries::from_raw(&records);

        prop_assert!(series.len() <= records.len());
        for pair in series.points().windows(2) {
            prop_assert!(pair[0].date() <= pair[1].date());
        }
        for point in &series {
            prop_assert!(point.nav().is_finite());
            prop_assert!(point.nav() > 0.0);
        }
    }

    #[test]
    fn property_resolution_prefers_earlier_or_equal(series in arb_series(), target in arb_date()) {
        let resolved = series.resolve(target).expect("non-empty series always resolves");
        let has_earlier = series.iter().any(|p| p.date() <= target);

        if has_earlier {
            prop_assert!(resolved.date() <= target);
            // Nothing between the chosen NAV and the target
            prop_assert!(!series
                .iter()
                .any(|p| p.date() > resolved.date() && p.date() <= target));
        } else {
            prop_assert_eq!(Some(resolved), series.earliest());
        }
    }

    #[test]
    fn property_resolution_is_idempotent(series in arb_series(), target in arb_date()) {
        prop_assert_eq!(series.resolve(target), series.resolve(target));
    }

    #[test]
    fn property_schedule_is_increasing_bounded_and_anchored(
        start in arb_date(),
        span_days in 0i64..4_000,
        cadence in arb_cadence(),
    ) {
        let end = start.add_days(span_days).unwrap();
        let dates = generate_schedule(start, end, cadence);

        prop_assert_eq!(dates.first().copied(), Some(start));
        for pair in dates.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
        for date in &dates {
            prop_assert!(*date <= end);
            prop_assert!(date.day() == start.day() || date.is_end_of_month());
        }

        // The next step would overshoot the end date
        let steps = dates.len() as i32 * cadence.months_per_step() as i32;
        prop_assert!(start.add_months(steps).unwrap() > end);
    }

    #[test]
    fn property_inverted_range_has_no_schedule(start in arb_date(), back in 1i64..1_000) {
        let end = start.add_days(-back).unwrap();
        prop_assert!(generate_schedule(start, end, Cadence::Monthly).is_empty());
    }
}
