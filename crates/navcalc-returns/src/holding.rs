//! Point-to-point NAV returns.

use serde::{Deserialize, Serialize};

use navcalc_core::{Date, NavSeries};

use crate::annualize::{annualize, percent_change};

/// Return between two resolved NAV observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingPeriodReturn {
    /// Date of the starting NAV.
    pub start_date: Date,
    /// Date of the ending NAV.
    pub end_date: Date,
    /// Starting NAV.
    pub start_nav: f64,
    /// Ending NAV.
    pub end_nav: f64,
    /// `(end_nav − start_nav) / start_nav × 100`.
    pub simple_return_pct: f64,
    /// Annualized over the days between the two NAV dates.
    pub annualized_return_pct: f64,
}

impl HoldingPeriodReturn {
    /// Calendar days between the two NAV observations.
    #[must_use]
    pub fn elapsed_days(&self) -> i64 {
        self.end_date - self.start_date
    }
}

/// Computes the return between the NAVs resolved for `start` and `end`.
///
/// Returns `None` for an inverted range or an empty series.
#[must_use]
pub fn compute_holding_period_return(
    series: &NavSeries,
    start: Date,
    end: Date,
) -> Option<HoldingPeriodReturn> {
    if start > end {
        return None;
    }

    let start_point = series.resolve(start)?;
    let end_point = series.resolve(end)?;

    Some(HoldingPeriodReturn {
        start_date: start_point.date(),
        end_date: end_point.date(),
        start_nav: start_point.nav(),
        end_nav: end_point.nav(),
        simple_return_pct: percent_change(start_point.nav(), end_point.nav()),
        annualized_return_pct: annualize(
            end_point.nav() / start_point.nav(),
            end_point.date() - start_point.date(),
        ),
    })
}
