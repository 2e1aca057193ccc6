//! Systematic investment plan (SIP) valuation.

use serde::{Deserialize, Serialize};

use navcalc_core::{Cadence, Date, NavPoint, NavSeries};
use navcalc_core::schedule::Schedule;

use crate::annualize::{annualize, growth_to_pct};
use crate::outcome::{InstallmentSnapshot, Review, Valuation, ValuationOutcome, ValuePoint};
use crate::validation::validate_request;

/// A fixed amount invested on every scheduled date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipPlan {
    /// Amount invested per installment.
    pub installment_amount: f64,
    /// Installment frequency.
    #[serde(default)]
    pub cadence: Cadence,
    /// First installment date.
    pub start_date: Date,
    /// Last date on which an installment may fall.
    pub end_date: Date,
}

impl SipPlan {
    /// Creates a monthly plan.
    #[must_use]
    pub fn monthly(installment_amount: f64, start_date: Date, end_date: Date) -> Self {
        Self {
            installment_amount,
            cadence: Cadence::Monthly,
            start_date,
            end_date,
        }
    }

    /// Sets the cadence.
    #[must_use]
    pub fn with_cadence(mut self, cadence: Cadence) -> Self {
        self.cadence = cadence;
        self
    }

    /// Values the plan against `series`.
    #[must_use]
    pub fn evaluate(&self, series: &NavSeries) -> ValuationOutcome {
        compute_sip(
            series,
            self.installment_amount,
            self.cadence,
            self.start_date,
            self.end_date,
        )
    }
}

/// Running totals while walking the schedule.
#[derive(Debug, Default)]
struct Accumulator {
    invested: f64,
    units: f64,
    timeline: Vec<InstallmentSnapshot>,
}

impl Accumulator {
    fn buy(mut self, scheduled: Date, point: &NavPoint, amount: f64) -> Self {
        let units_bought = amount / point.nav();
        self.invested += amount;
        self.units += units_bought;
        self.timeline.push(InstallmentSnapshot {
            date: point.date(),
            scheduled_date: scheduled,
            nav_used: point.nav(),
            units_bought,
            cumulative_units: self.units,
            cumulative_invested: self.invested,
            value_at_that_date: self.units * point.nav(),
        });
        self
    }
}

/// Values a SIP of `installment_amount` every `cadence` step from `start` to
/// `end` (inclusive).
///
/// Each scheduled date buys units at the NAV the resolver picks for it. The
/// holding is valued at the latest NAV of the whole series, and annualized
/// over the requested range.
///
/// # Example
///
/// ```rust
/// use navcalc_core::{Cadence, Date, NavSeries};
/// use navcalc_returns::sip::compute_sip;
///
/// let d = |m, day| Date::from_ymd(2023, m, day).unwrap();
/// let series = NavSeries::from_pairs([(d(1, 2), 100.0), (d(2, 1), 80.0), (d(3, 1), 100.0)]);
///
/// let outcome = compute_sip(&series, 1000.0, Cadence::Monthly, d(1, 2), d(3, 1));
/// let valuation = outcome.valuation().unwrap();
/// assert_eq!(valuation.total_invested, 2000.0);
/// assert_eq!(valuation.total_units, 22.5);
/// ```
#[must_use]
pub fn compute_sip(
    series: &NavSeries,
    installment_amount: f64,
    cadence: Cadence,
    start: Date,
    end: Date,
) -> ValuationOutcome {
    if let Err(review) = validate_request(installment_amount, start, end) {
        return review.into();
    }

    let acc = Schedule::new(start, end, cadence).fold(Accumulator::default(), |acc, scheduled| {
        match series.resolve(scheduled) {
            Some(point) => acc.buy(scheduled, point, installment_amount),
            None => {
                log::debug!("no NAV for installment on {scheduled}, skipping");
                acc
            }
        }
    });

    if acc.invested <= 0.0 {
        return Review::no_installments().into();
    }

    // Non-empty: at least one installment resolved.
    let Some(latest) = series.latest() else {
        return Review::missing_nav(end).into();
    };

    let current_value = acc.units * latest.nav();
    let multiple = current_value / acc.invested;
    let value_series = value_series(series.within(start, end), &acc.timeline);

    log::debug!(
        "sip valued: {} installments, invested {:.2}, value {:.2}",
        acc.timeline.len(),
        acc.invested,
        current_value
    );

    Valuation {
        total_invested: acc.invested,
        current_value,
        total_units: acc.units,
        absolute_return_pct: growth_to_pct(multiple),
        annualized_return_pct: annualize(multiple, end - start),
        timeline: acc.timeline,
        value_series,
    }
    .into()
}

/// Values the holding on each NAV date in `points`.
///
/// Resolved NAV dates never decrease along the schedule, so one forward pass
/// over the timeline suffices.
fn value_series(points: &[NavPoint], timeline: &[InstallmentSnapshot]) -> Vec<ValuePoint> {
    let mut next = 0;
    let mut units_held = 0.0;
    let mut invested = 0.0;

    points
        .iter()
        .map(|point| {
            while next < timeline.len() && timeline[next].date <= point.date() {
                units_held = timeline[next].cumulative_units;
                invested = timeline[next].cumulative_invested;
                next += 1;
            }
            ValuePoint {
                date: point.date(),
                nav: point.nav(),
                units_held,
                invested,
                value: units_held * point.nav(),
            }
        })
        .collect()
}

/// Clamps `[start, end]` to the dates covered by `series`.
///
/// Returns `None` for an empty series or when the clamped range is inverted,
/// i.e. the request lies entirely outside the available history.
#[must_use]
pub fn clamp_range_to_series(series: &NavSeries, start: Date, end: Date) -> Option<(Date, Date)> {
    let (earliest, latest) = series.date_range()?;
    let from = start.max(earliest);
    let to = end.min(latest);
    if from > to {
        log::debug!("range {start}..{end} lies outside history {earliest}..{latest}");
        return None;
    }
    Some((from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ReviewReason;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sample_series() -> NavSeries {
        NavSeries::from_pairs([
            (date(2023, 1, 2), 100.0),
            (date(2023, 1, 16), 90.0),
            (date(2023, 2, 1), 80.0),
            (date(2023, 2, 15), 90.0),
            (date(2023, 3, 1), 100.0),
            (date(2023, 3, 15), 120.0),
        ])
    }

    #[test]
    fn test_monthly_sip() {
        let outcome = compute_sip(
            &sample_series(),
            1000.0,
            Cadence::Monthly,
            date(2023, 1, 2),
            date(2023, 3, 2),
        );
        let v = outcome.valuation().unwrap();

        assert_eq!(v.installments(), 3);
        assert_relative_eq!(v.total_invested, 3000.0);
        // 10 + 12.5 + 10 units
        assert_relative_eq!(v.total_units, 32.5, epsilon = 1e-12);
        // Valued at the latest NAV of the series (120), not at the end date.
        assert_relative_eq!(v.current_value, 3900.0, epsilon = 1e-9);
        assert_relative_eq!(v.absolute_return_pct, 30.0, epsilon = 1e-9);
        // Under a year: annualized equals absolute.
        assert_relative_eq!(v.annualized_return_pct, v.absolute_return_pct, epsilon = 1e-12);
    }

    #[test]
    fn test_timeline_snapshots() {
        let outcome = compute_sip(
            &sample_series(),
            1000.0,
            Cadence::Monthly,
            date(2023, 1, 2),
            date(2023, 3, 2),
        );
        let timeline = &outcome.valuation().unwrap().timeline;

        // Feb 2 has no NAV; the Feb 1 NAV is used.
        assert_eq!(timeline[1].scheduled_date, date(2023, 2, 2));
        assert_eq!(timeline[1].date, date(2023, 2, 1));
        assert_relative_eq!(timeline[1].nav_used, 80.0);
        assert_relative_eq!(timeline[1].units_bought, 12.5);
        assert_relative_eq!(timeline[1].cumulative_units, 22.5);
        assert_relative_eq!(timeline[1].cumulative_invested, 2000.0);
        assert_relative_eq!(timeline[1].value_at_that_date, 1800.0);
    }

    #[test]
    fn test_value_series_tracks_units_held() {
        let outcome = compute_sip(
            &sample_series(),
            1000.0,
            Cadence::Monthly,
            date(2023, 1, 2),
            date(2023, 3, 2),
        );
        let series = &outcome.valuation().unwrap().value_series;

        let dates: Vec<_> = series.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![date(2023, 1, 2), date(2023, 1, 16), date(2023, 2, 1), date(2023, 2, 15), date(2023, 3, 1)]
        );
        assert_relative_eq!(series[1].units_held, 10.0);
        assert_relative_eq!(series[1].value, 900.0);
        assert_relative_eq!(series[3].units_held, 22.5);
        assert_relative_eq!(series[3].invested, 2000.0);
        assert_relative_eq!(series[4].units_held, 32.5, epsilon = 1e-12);
    }

    #[test]
    fn test_quarterly_sip() {
        let series = NavSeries::from_pairs([
            (date(2022, 1, 3), 10.0),
            (date(2022, 4, 1), 10.0),
            (date(2022, 7, 1), 10.0),
            (date(2022, 10, 3), 10.0),
        ]);
        let outcome = compute_sip(&series, 500.0, Cadence::Quarterly, date(2022, 1, 3), date(2022, 12, 31));
        let v = outcome.valuation().unwrap();
        assert_eq!(v.installments(), 4);
        assert_relative_eq!(v.total_invested, 2000.0);
        assert_relative_eq!(v.absolute_return_pct, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_series_needs_review() {
        let outcome = compute_sip(
            &NavSeries::empty(),
            1000.0,
            Cadence::Monthly,
            date(2023, 1, 1),
            date(2023, 6, 1),
        );
        assert_eq!(outcome.review().unwrap().reason, ReviewReason::NoInstallments);
    }

    #[test]
    fn test_invalid_requests() {
        let series = sample_series();
        let inverted = compute_sip(&series, 1000.0, Cadence::Monthly, date(2023, 3, 1), date(2023, 1, 1));
        assert_eq!(inverted.review().unwrap().reason, ReviewReason::InvertedRange);

        let zero = compute_sip(&series, 0.0, Cadence::Monthly, date(2023, 1, 1), date(2023, 3, 1));
        assert_eq!(zero.review().unwrap().reason, ReviewReason::NonPositiveAmount);
    }

    #[test]
    fn test_plan_evaluate_matches_function() {
        let plan = SipPlan::monthly(1000.0, date(2023, 1, 2), date(2023, 3, 2));
        let series = sample_series();
        assert_eq!(
            plan.evaluate(&series),
            compute_sip(&series, 1000.0, Cadence::Monthly, date(2023, 1, 2), date(2023, 3, 2))
        );

        let quarterly = SipPlan::monthly(1000.0, date(2023, 1, 2), date(2023, 3, 2))
            .with_cadence(Cadence::Quarterly);
        assert_eq!(quarterly.cadence, Cadence::Quarterly);
        let v = quarterly.evaluate(&series).into_result().unwrap();
        assert_eq!(v.timeline.len(), 1);
        assert_relative_eq!(v.total_invested, 1000.0);
    }

    #[test]
    fn test_clamp_range_to_series() {
        let series = sample_series();
        assert_eq!(
            clamp_range_to_series(&series, date(2022, 1, 1), date(2024, 1, 1)),
            Some((date(2023, 1, 2), date(2023, 3, 15)))
        );
        assert_eq!(
            clamp_range_to_series(&series, date(2023, 2, 1), date(2023, 2, 20)),
            Some((date(2023, 2, 1), date(2023, 2, 20)))
        );
        assert_eq!(clamp_range_to_series(&series, date(2024, 1, 1), date(2024, 6, 1)), None);
        assert_eq!(
            clamp_range_to_series(&NavSeries::empty(), date(2023, 1, 1), date(2023, 2, 1)),
            None
        );
    }
}
