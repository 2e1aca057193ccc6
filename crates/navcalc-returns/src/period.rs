//! Preset trailing holding periods (1m, 3m, 6m, 1y, 3y, 5y).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use navcalc_core::{Date, NavError, NavResult, NavSeries};

use crate::holding::{compute_holding_period_return, HoldingPeriodReturn};

/// A trailing period ending on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HoldingPeriod {
    /// One month.
    #[serde(rename = "1m")]
    OneMonth,
    /// Three months.
    #[serde(rename = "3m")]
    ThreeMonths,
    /// Six months.
    #[serde(rename = "6m")]
    SixMonths,
    /// One year.
    #[serde(rename = "1y")]
    OneYear,
    /// Three years.
    #[serde(rename = "3y")]
    ThreeYears,
    /// Five years.
    #[serde(rename = "5y")]
    FiveYears,
}

impl HoldingPeriod {
    /// All presets, shortest first.
    pub const ALL: [HoldingPeriod; 6] = [
        HoldingPeriod::OneMonth,
        HoldingPeriod::ThreeMonths,
        HoldingPeriod::SixMonths,
        HoldingPeriod::OneYear,
        HoldingPeriod::ThreeYears,
        HoldingPeriod::FiveYears,
    ];

    /// Length of the period in calendar months.
    #[must_use]
    pub fn months(&self) -> i32 {
        match self {
            HoldingPeriod::OneMonth => 1,
            HoldingPeriod::ThreeMonths => 3,
            HoldingPeriod::SixMonths => 6,
            HoldingPeriod::OneYear => 12,
            HoldingPeriod::ThreeYears => 36,
            HoldingPeriod::FiveYears => 60,
        }
    }

    /// Short code, e.g. `"1y"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            HoldingPeriod::OneMonth => "1m",
            HoldingPeriod::ThreeMonths => "3m",
            HoldingPeriod::SixMonths => "6m",
            HoldingPeriod::OneYear => "1y",
            HoldingPeriod::ThreeYears => "3y",
            HoldingPeriod::FiveYears => "5y",
        }
    }

    /// The `(start, end)` range of this period ending on `end`.
    ///
    /// The start is `end` moved back by whole months, clamped to month end.
    pub fn range_ending(&self, end: Date) -> NavResult<(Date, Date)> {
        Ok((end.add_months(-self.months())?, end))
    }
}

impl fmt::Display for HoldingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HoldingPeriod {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1m" => Ok(HoldingPeriod::OneMonth),
            "3m" => Ok(HoldingPeriod::ThreeMonths),
            "6m" => Ok(HoldingPeriod::SixMonths),
            "1y" | "12m" => Ok(HoldingPeriod::OneYear),
            "3y" => Ok(HoldingPeriod::ThreeYears),
            "5y" => Ok(HoldingPeriod::FiveYears),
            _ => Err(NavError::invalid_period(s)),
        }
    }
}

/// Return for one preset period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReturn {
    /// The preset.
    pub period: HoldingPeriod,
    /// The return, or `None` when it cannot be computed.
    pub result: Option<HoldingPeriodReturn>,
}

/// Computes the return for `period` ending on `end`.
pub fn compute_period_return(
    series: &NavSeries,
    period: HoldingPeriod,
    end: Date,
) -> NavResult<Option<HoldingPeriodReturn>> {
    let (start, end) = period.range_ending(end)?;
    Ok(compute_holding_period_return(series, start, end))
}

/// Computes every preset period ending on `end`.
///
/// A period whose start precedes the history still resolves (to the first
/// NAV), matching how a single point-to-point request behaves.
pub fn compute_period_returns(series: &NavSeries, end: Date) -> NavResult<Vec<PeriodReturn>> {
    HoldingPeriod::ALL
        .iter()
        .map(|&period| {
            Ok(PeriodReturn {
                period,
                result: compute_period_return(series, period, end)?,
            })
        })
        .collect()
}
