//! Calendar date type for NAV calculations.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::error::{NavError, NavResult};

/// Date format used by the upstream NAV provider (`DD-MM-YYYY`).
pub const UPSTREAM_DATE_FORMAT: &str = "%d-%m-%Y";

/// ISO 8601 calendar date format (`YYYY-MM-DD`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A pure calendar date: no time of day, no timezone.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. Two NAV observations
/// published on the same day compare equal regardless of where or when they
/// were fetched.
///
/// # Example
///
/// ```rust
/// use navcalc_core::types::Date;
///
/// let date = Date::from_ymd(2023, 1, 31).unwrap();
/// let next = date.add_months(1).unwrap();
/// assert_eq!(next, Date::from_ymd(2023, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDate` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> NavResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| NavError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses an ISO 8601 date (`YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> NavResult<Self> {
        NaiveDate::parse_from_str(s.trim(), ISO_DATE_FORMAT)
            .map(Date)
            .map_err(|_| NavError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Parses a date in the upstream provider's day-month-year format
    /// (`DD-MM-YYYY`, e.g. `31-01-2023`).
    ///
    /// Never falls back to a month-day-year reading: `02-01-2023` is the
    /// 2nd of January.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDate` if the string is not a valid date.
    pub fn parse_dmy(s: &str) -> NavResult<Self> {
        NaiveDate::parse_from_str(s.trim(), UPSTREAM_DATE_FORMAT)
            .map(Date)
            .map_err(|_| NavError::invalid_date(format!("Cannot parse day-month-year: {s}")))
    }

    /// Returns today's date in the local timezone.
    #[must_use]
    pub fn today() -> Self {
        Date(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Adds a number of days to the date.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDate` if the result is out of range.
    pub fn add_days(&self, days: i64) -> NavResult<Self> {
        chrono::Duration::try_days(days)
            .and_then(|delta| self.0.checked_add_signed(delta))
            .map(Date)
            .ok_or_else(|| NavError::invalid_date(format!("{self} + {days} days is out of range")))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month. Negative values
    /// move backwards.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> NavResult<Self> {
        let total_months = i64::from(self.year()) * 12 + i64::from(self.month()) - 1
            + i64::from(months);
        let new_year = i32::try_from(total_months.div_euclid(12))
            .map_err(|_| NavError::invalid_date(format!("{self} + {months} months overflows")))?;
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        // Clamp day to valid range for new month
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date, clamping Feb 29 to Feb 28.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidDate` if the result is out of range.
    pub fn add_years(&self, years: i32) -> NavResult<Self> {
        let months = years
            .checked_mul(12)
            .ok_or_else(|| NavError::invalid_date(format!("{self} + {years} years overflows")))?;
        self.add_months(months)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    ///
    /// Positive when `other` is later.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the last day of the date's month.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        let last = self.days_in_month();
        // Every (year, month) pair we already hold has a valid last day.
        NaiveDate::from_ymd_opt(self.year(), self.month(), last).map_or(*self, Date)
    }

    /// Checks if the date is the last day of its month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Formats the date in the upstream `DD-MM-YYYY` format.
    #[must_use]
    pub fn to_dmy_string(&self) -> String {
        self.0.format(UPSTREAM_DATE_FORMAT).to_string()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl std::str::FromStr for Date {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// Days in a month for a given year. `month` must be 1-12.
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_creation() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_parse_iso() {
        let date = Date::parse("2025-06-15").unwrap();
        assert_eq!(date, Date::from_ymd(2025, 6, 15).unwrap());
        assert!(Date::parse("15-06-2025").is_err());
    }

    #[test]
    fn test_parse_dmy_is_day_first() {
        let date = Date::parse_dmy("02-01-2023").unwrap();
        assert_eq!(date.month(), 1);
        assert_eq!(date.day(), 2);

        // 13 is never a month
        assert!(Date::parse_dmy("01-13-2023").is_err());
        assert!(Date::parse_dmy("31-02-2023").is_err());
        assert!(Date::parse_dmy("").is_err());
        assert!(Date::parse_dmy(" 05-04-2023 ").is_ok());
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        let date = Date::from_ymd(2023, 1, 31).unwrap();
        assert_eq!(date.add_months(1).unwrap(), Date::from_ymd(2023, 2, 28).unwrap());
        assert_eq!(date.add_months(2).unwrap(), Date::from_ymd(2023, 3, 31).unwrap());
        assert_eq!(date.add_months(3).unwrap(), Date::from_ymd(2023, 4, 30).unwrap());

        let leap = Date::from_ymd(2024, 1, 30).unwrap();
        assert_eq!(leap.add_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_add_months_negative_crosses_year() {
        let date = Date::from_ymd(2024, 3, 31).unwrap();
        assert_eq!(date.add_months(-1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(date.add_months(-3).unwrap(), Date::from_ymd(2023, 12, 31).unwrap());
        assert_eq!(date.add_months(-15).unwrap(), Date::from_ymd(2022, 12, 31).unwrap());
    }

    #[test]
    fn test_add_years_from_leap_day() {
        let date = Date::from_ymd(2024, 2, 29).unwrap();
        assert_eq!(date.add_years(1).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
        assert_eq!(date.add_years(-4).unwrap(), Date::from_ymd(2020, 2, 29).unwrap());
    }

    #[test]
    fn test_add_days() {
        let date = Date::from_ymd(2023, 12, 31).unwrap();
        assert_eq!(date.add_days(1).unwrap(), Date::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(date.add_days(-365).unwrap(), Date::from_ymd(2022, 12, 31).unwrap());
        assert!(date.add_days(i64::MAX).is_err());
    }

    #[test]
    fn test_days_between() {
        let d1 = Date::from_ymd(2025, 1, 1).unwrap();
        let d2 = Date::from_ymd(2025, 1, 31).unwrap();
        assert_eq!(d1.days_between(&d2), 30);
        assert_eq!(d2 - d1, 30);
        assert_eq!(d1 - d2, -30);
    }

    #[test]
    fn test_end_of_month() {
        let date = Date::from_ymd(2023, 2, 10).unwrap();
        assert_eq!(date.end_of_month(), Date::from_ymd(2023, 2, 28).unwrap());
        assert!(Date::from_ymd(2024, 2, 29).unwrap().is_end_of_month());
        assert!(!date.is_end_of_month());
    }

    #[test]
    fn test_display_formats() {
        let date = Date::from_ymd(2025, 6, 5).unwrap();
        assert_eq!(format!("{}", date), "2025-06-05");
        assert_eq!(date.to_dmy_string(), "05-06-2025");
    }

    #[test]
    fn test_serde() {
        let date = Date::from_ymd(2025, 6, 15).unwrap();
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
