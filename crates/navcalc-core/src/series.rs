//! Normalized NAV time series.
//!
//! Upstream histories arrive newest-first, oldest-first, or in no particular
//! order, and occasionally carry unparseable dates or placeholder NAVs.
//! [`NavSeries`] is the cleaned form every calculation works on: only valid
//! points, sorted ascending by date.

use serde::{Deserialize, Serialize};

use crate::resolver::{resolve_nav, resolve_nav_detailed, Resolution};
use crate::types::{Date, NavPoint, RawNavRecord};

/// An ascending-by-date sequence of validated NAV observations.
///
/// Duplicate dates are kept; the sort is stable, so points sharing a date
/// stay in their input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<NavPoint>", into = "Vec<NavPoint>")]
pub struct NavSeries {
    points: Vec<NavPoint>,
}

impl NavSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalizes raw upstream records.
    ///
    /// Each date is read as `DD-MM-YYYY` and each NAV as a float. Records with
    /// an invalid date or a NAV that is not finite and positive are dropped.
    /// Empty, fully invalid and unsorted inputs are all fine.
    ///
    /// # Example
    ///
    /// ```rust
    /// use navcalc_core::series::NavSeries;
    /// use navcalc_core::types::RawNavRecord;
    ///
    /// let raw = vec![
    ///     RawNavRecord::new("03-01-2023", "101.5"),
    ///     RawNavRecord::new("02-01-2023", "100.0"),
    ///     RawNavRecord::new("not-a-date", "99.0"),
    ///     RawNavRecord::new("04-01-2023", "N.A."),
    /// ];
    ///
    /// let series = NavSeries::from_raw(&raw);
    /// assert_eq!(series.len(), 2);
    /// assert_eq!(series.points()[0].nav(), 100.0);
    /// ```
    pub fn from_raw<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a RawNavRecord>,
    {
        let mut total = 0usize;
        let points: Vec<NavPoint> = records
            .into_iter()
            .inspect(|_| total += 1)
            .filter_map(RawNavRecord::parse)
            .collect();

        let dropped = total - points.len();
        if dropped > 0 {
            log::debug!("dropped {dropped} of {total} NAV records during normalization");
        }

        Self::from_points(points)
    }

    /// Builds a series from already validated points, sorting them by date.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = NavPoint>,
    {
        let mut points: Vec<NavPoint> = points.into_iter().collect();
        points.sort_by_key(NavPoint::date);
        Self { points }
    }

    /// Builds a series from `(date, nav)` pairs, dropping pairs whose NAV is
    /// not finite and positive.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Date, f64)>,
    {
        Self::from_points(
            pairs
                .into_iter()
                .filter_map(|(date, nav)| NavPoint::new(date, nav).ok()),
        )
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The observations, ascending by date.
    #[must_use]
    pub fn points(&self) -> &[NavPoint] {
        &self.points
    }

    /// Iterates over the observations in ascending date order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavPoint> {
        self.points.iter()
    }

    /// The earliest observation.
    #[must_use]
    pub fn earliest(&self) -> Option<&NavPoint> {
        self.points.iter().min_by_key(|p| p.date())
    }

    /// The latest observation, found by an explicit maximum-date scan.
    ///
    /// When several points share the latest date, the last of them wins.
    #[must_use]
    pub fn latest(&self) -> Option<&NavPoint> {
        self.points.iter().max_by_key(|p| p.date())
    }

    /// The first and last observation dates.
    #[must_use]
    pub fn date_range(&self) -> Option<(Date, Date)> {
        Some((self.earliest()?.date(), self.latest()?.date()))
    }

    /// Observations whose date lies in `[from, to]` (inclusive).
    ///
    /// Returns an empty slice for an inverted range.
    #[must_use]
    pub fn within(&self, from: Date, to: Date) -> &[NavPoint] {
        if from > to {
            return &[];
        }
        let start = self.points.partition_point(|p| p.date() < from);
        let end = self.points.partition_point(|p| p.date() <= to);
        &self.points[start..end]
    }

    /// Resolves the NAV to use for `target`; see [`crate::resolver`].
    #[must_use]
    pub fn resolve(&self, target: Date) -> Option<&NavPoint> {
        resolve_nav(&self.points, target)
    }

    /// Resolves the NAV to use for `target`, reporting how it matched.
    #[must_use]
    pub fn resolve_detailed(&self, target: Date) -> Option<Resolution<'_>> {
        resolve_nav_detailed(&self.points, target)
    }
}

impl From<Vec<NavPoint>> for NavSeries {
    fn from(points: Vec<NavPoint>) -> Self {
        Self::from_points(points)
    }
}

impl From<NavSeries> for Vec<NavPoint> {
    fn from(series: NavSeries) -> Self {
        series.points
    }
}

impl FromIterator<NavPoint> for NavSeries {
    fn from_iter<T: IntoIterator<Item = NavPoint>>(iter: T) -> Self {
        Self::from_points(iter)
    }
}

impl<'a> IntoIterator for &'a NavSeries {
    type Item = &'a NavPoint;
    type IntoIter = std::slice::Iter<'a, NavPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
