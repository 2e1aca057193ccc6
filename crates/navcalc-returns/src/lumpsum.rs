//! One-time (lump-sum) investment valuation.

use serde::{Deserialize, Serialize};

use navcalc_core::{Date, NavSeries};

use crate::annualize::{annualize, growth_to_pct};
use crate::outcome::{InstallmentSnapshot, Review, Valuation, ValuationOutcome, ValuePoint};
use crate::validation::validate_request;

/// A single investment held from `start_date` to `end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpsumPlan {
    /// Amount invested.
    pub amount: f64,
    /// Purchase date.
    pub start_date: Date,
    /// Valuation date.
    pub end_date: Date,
}

impl LumpsumPlan {
    /// Creates a plan.
    #[must_use]
    pub fn new(amount: f64, start_date: Date, end_date: Date) -> Self {
        Self {
            amount,
            start_date,
            end_date,
        }
    }

    /// Values the plan against `series`.
    #[must_use]
    pub fn evaluate(&self, series: &NavSeries) -> ValuationOutcome {
        compute_lumpsum(series, self.amount, self.start_date, self.end_date)
    }
}

/// Values `amount` invested at the NAV resolved for `start` and held until
/// the NAV resolved for `end`.
///
/// # Example
///
/// ```rust
/// use navcalc_core::{Date, NavSeries};
/// use navcalc_returns::lumpsum::compute_lumpsum;
///
/// let start = Date::from_ymd(2023, 1, 1).unwrap();
/// let end = Date::from_ymd(2023, 1, 31).unwrap();
/// let series = NavSeries::from_pairs([(start, 100.0), (end, 110.0)]);
///
/// let valuation = compute_lumpsum(&series, 1000.0, start, end).into_result().unwrap();
/// assert!((valuation.current_value - 1100.0).abs() < 1e-9);
/// assert!((valuation.absolute_return_pct - 10.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn compute_lumpsum(series: &NavSeries, amount: f64, start: Date, end: Date) -> ValuationOutcome {
    if let Err(review) = validate_request(amount, start, end) {
        return review.into();
    }

    let Some(start_point) = series.resolve(start) else {
        return Review::missing_nav(start).into();
    };
    let Some(end_point) = series.resolve(end) else {
        return Review::missing_nav(end).into();
    };

    let units = amount / start_point.nav();
    let growth = end_point.nav() / start_point.nav();
    let current_value = amount * growth;
    let multiple = current_value / amount;

    let timeline = vec![InstallmentSnapshot {
        date: start_point.date(),
        scheduled_date: start,
        nav_used: start_point.nav(),
        units_bought: units,
        cumulative_units: units,
        cumulative_invested: amount,
        value_at_that_date: amount,
    }];

    let value_series = series
        .within(start, end)
        .iter()
        .map(|point| ValuePoint {
            date: point.date(),
            nav: point.nav(),
            units_held: units,
            invested: amount,
            value: units * point.nav(),
        })
        .collect();

    Valuation {
        total_invested: amount,
        current_value,
        total_units: units,
        absolute_return_pct: growth_to_pct(multiple),
        annualized_return_pct: annualize(multiple, end_point.date() - start_point.date()),
        timeline,
        value_series,
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ReviewReason;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_plan_evaluate_matches_function() {
        let series = NavSeries::from_pairs([(date(2023, 1, 1), 100.0), (date(2023, 1, 31), 110.0)]);
        let plan = LumpsumPlan::new(1000.0, date(2023, 1, 1), date(2023, 1, 31));
        assert_eq!(
            plan.evaluate(&series),
            compute_lumpsum(&series, 1000.0, date(2023, 1, 1), date(2023, 1, 31))
        );

        let json = serde_json::to_value(plan).unwrap();
        assert_eq!(json["startDate"], "2023-01-01");
    }

    #[test]
    fn test_one_month_gain() {
        let series = NavSeries::from_pairs([(date(2023, 1, 1), 100.0), (date(2023, 1, 31), 110.0)]);
        let v = compute_lumpsum(&series, 1000.0, date(2023, 1, 1), date(2023, 1, 31))
            .into_result()
            .unwrap();

        assert_relative_eq!(v.total_invested, 1000.0);
        assert_relative_eq!(v.total_units, 10.0);
        assert_relative_eq!(v.current_value, 1100.0, epsilon = 1e-9);
        assert_relative_eq!(v.absolute_return_pct, 10.0, epsilon = 1e-9);
        assert_relative_eq!(v.annualized_return_pct, 10.0, epsilon = 1e-9);
        assert_eq!(v.installments(), 1);
        assert_eq!(v.value_series.len(), 2);
    }

    #[test]
    fn test_multi_year_is_annualized() {
        let series = NavSeries::from_pairs([(date(2020, 1, 1), 100.0), (date(2022, 1, 1), 121.0)]);
        let v = compute_lumpsum(&series, 1000.0, date(2020, 1, 1), date(2022, 1, 1))
            .into_result()
            .unwrap();
        assert_relative_eq!(v.absolute_return_pct, 21.0, epsilon = 1e-9);
        // 731 days is slightly over two years
        assert!(v.annualized_return_pct < 10.0);
        assert!(v.annualized_return_pct > 9.9);
    }

    #[test]
    fn test_resolves_non_trading_dates() {
        let series = NavSeries::from_pairs([
            (date(2023, 1, 2), 50.0),
            (date(2023, 3, 31), 55.0),
            (date(2023, 4, 3), 60.0),
        ]);
        // Start precedes the history: nearest later NAV. End falls on a weekend.
        let v = compute_lumpsum(&series, 500.0, date(2023, 1, 1), date(2023, 4, 1))
            .into_result()
            .unwrap();
        assert_eq!(v.timeline[0].date, date(2023, 1, 2));
        assert_relative_eq!(v.current_value, 550.0, epsilon = 1e-9);
    }

    #[test]
    fn test_single_point_round_trip() {
        let d = date(2023, 5, 5);
        let series = NavSeries::from_pairs([(d, 37.5)]);
        let v = compute_lumpsum(&series, 2500.0, d, d).into_result().unwrap();
        assert_eq!(v.current_value, 2500.0);
        assert_eq!(v.absolute_return_pct, 0.0);
        assert_eq!(v.annualized_return_pct, 0.0);
    }

    #[test]
    fn test_rejections() {
        let series = NavSeries::from_pairs([(date(2023, 1, 1), 100.0)]);

        let empty = compute_lumpsum(&NavSeries::empty(), 1000.0, date(2023, 1, 1), date(2023, 2, 1));
        assert_eq!(empty.review().unwrap().reason, ReviewReason::MissingNav);

        let inverted = compute_lumpsum(&series, 1000.0, date(2023, 2, 1), date(2023, 1, 1));
        assert_eq!(inverted.review().unwrap().reason, ReviewReason::InvertedRange);

        let negative = compute_lumpsum(&series, -1.0, date(2023, 1, 1), date(2023, 2, 1));
        assert_eq!(negative.review().unwrap().reason, ReviewReason::NonPositiveAmount);
    }
}
