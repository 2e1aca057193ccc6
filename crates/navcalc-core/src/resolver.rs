//! Nearest-date NAV resolution.
//!
//! A transaction on a given day is priced at the NAV published on that day
//! or, failing that, the most recent NAV before it. Only when no earlier NAV
//! exists at all (the target predates the whole history) is the closest
//! later NAV used instead.
//!
//! This is the only matching policy in NavCalc. The "absolute nearest date in
//! either direction" rule is deliberately not offered: it would price a
//! purchase with a NAV that was not yet published.

use serde::{Deserialize, Serialize};

use crate::types::{Date, NavPoint};

/// How a resolved NAV relates to the requested date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// Published on the requested date.
    Exact,
    /// Most recent NAV before the requested date.
    Earlier,
    /// No earlier NAV exists; nearest NAV after the requested date.
    Later,
}

/// A resolved NAV together with how it was matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution<'a> {
    /// The NAV observation to use.
    pub point: &'a NavPoint,
    /// Relationship between `point.date()` and the requested date.
    pub kind: MatchKind,
    /// Calendar days between the requested date and the NAV date.
    pub distance_days: i64,
}

/// Resolves the NAV observation to use for `target`.
///
/// Scans `points` once, keeping the best earlier-or-equal candidate and the
/// best strictly-later candidate, and prefers the former. Input order does
/// not matter; among candidates at the same distance the first one scanned
/// wins. Returns `None` only for an empty slice.
///
/// # Example
///
/// ```rust
/// use navcalc_core::resolver::resolve_nav;
/// use navcalc_core::types::{Date, NavPoint};
///
/// let points = vec![
///     NavPoint::new(Date::from_ymd(2023, 1, 2).unwrap(), 100.0).unwrap(),
///     NavPoint::new(Date::from_ymd(2023, 1, 4).unwrap(), 102.0).unwrap(),
/// ];
///
/// // A holiday on the 3rd uses the NAV of the 2nd, not the nearer-or-equal 4th.
/// let nav = resolve_nav(&points, Date::from_ymd(2023, 1, 3).unwrap()).unwrap();
/// assert_eq!(nav.nav(), 100.0);
/// ```
#[must_use]
pub fn resolve_nav(points: &[NavPoint], target: Date) -> Option<&NavPoint> {
    resolve_nav_detailed(points, target).map(|resolution| resolution.point)
}

/// Like [`resolve_nav`], but also reports how the NAV was matched.
#[must_use]
pub fn resolve_nav_detailed(points: &[NavPoint], target: Date) -> Option<Resolution<'_>> {
    let mut best_earlier: Option<(&NavPoint, i64)> = None;
    let mut best_later: Option<(&NavPoint, i64)> = None;

    for point in points {
        let diff = point.date() - target;
        if diff <= 0 {
            let distance = -diff;
            if best_earlier.map_or(true, |(_, best)| distance < best) {
                best_earlier = Some((point, distance));
            }
        } else if best_later.map_or(true, |(_, best)| diff < best) {
            best_later = Some((point, diff));
        }
    }

    if let Some((point, distance_days)) = best_earlier {
        let kind = if distance_days == 0 {
            MatchKind::Exact
        } else {
            MatchKind::Earlier
        };
        return Some(Resolution {
            point,
            kind,
            distance_days,
        });
    }

    best_later.map(|(point, distance_days)| {
        log::trace!(
            "no NAV on or before {target}; falling back to later NAV of {}",
            point.date()
        );
        Resolution {
            point,
            kind: MatchKind::Later,
            distance_days,
        }
    })
}
