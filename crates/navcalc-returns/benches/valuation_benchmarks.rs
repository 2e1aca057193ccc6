//! Benchmarks for the navcalc valuation engine.
//!
//! Run with: cargo bench -p navcalc-returns

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use navcalc_core::{Cadence, Date, NavSeries, RawNavRecord};
use navcalc_returns::{compute_holding_period_return, compute_lumpsum, compute_sip};

// =============================================================================
// TEST DATA GENERATORS
// =============================================================================

/// Daily NAVs (weekdays only) for `years` years starting 2000-01-03.
fn create_daily_series(years: i64) -> NavSeries {
    let start = Date::from_ymd(2000, 1, 3).unwrap();
    NavSeries::from_pairs((0..years * 365).filter(|d| d % 7 < 5).map(|d| {
        let nav = 10.0 * (1.0 + 0.0003 * d as f64) * (1.0 + 0.02 * ((d as f64) / 17.0).sin());
        (start.add_days(d).unwrap(), nav)
    }))
}

/// Newest-first upstream records, as a remote feed delivers them.
fn create_raw_records(count: i64) -> Vec<RawNavRecord> {
    let start = Date::from_ymd(2000, 1, 3).unwrap();
    (0..count)
        .rev()
        .map(|d| {
            let date = start.add_days(d).unwrap();
            RawNavRecord::new(date.to_dmy_string(), format!("{:.4}", 10.0 + d as f64 * 0.01))
        })
        .collect()
}

// =============================================================================
// NORMALIZATION
// =============================================================================

fn bench_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalization");

    for size in [1_000i64, 5_000, 20_000] {
        let records = create_raw_records(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| NavSeries::from_raw(black_box(records)));
        });
    }

    group.finish();
}

// =============================================================================
// VALUATIONS
// =============================================================================

fn bench_sip(c: &mut Criterion) {
    let mut group = c.benchmark_group("sip");
    let start = Date::from_ymd(2000, 1, 3).unwrap();

    for years in [1i64, 5, 20] {
        let series = create_daily_series(years);
        let end = start.add_years(years as i32).unwrap();
        group.throughput(Throughput::Elements(years as u64 * 12));
        group.bench_with_input(BenchmarkId::new("monthly", years), &series, |b, series| {
            b.iter(|| compute_sip(black_box(series), 5000.0, Cadence::Monthly, start, end));
        });
    }

    group.finish();
}

fn bench_lumpsum_and_holding(c: &mut Criterion) {
    let series = create_daily_series(20);
    let start = Date::from_ymd(2003, 6, 15).unwrap();
    let end = Date::from_ymd(2018, 6, 15).unwrap();

    c.bench_function("lumpsum_15y", |b| {
        b.iter(|| compute_lumpsum(black_box(&series), 100_000.0, start, end));
    });

    c.bench_function("holding_period_15y", |b| {
        b.iter(|| compute_holding_period_return(black_box(&series), start, end));
    });
}

criterion_group!(benches, bench_normalization, bench_sip, bench_lumpsum_and_holding);
criterion_main!(benches);
