//! NAV observations.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Date;
use crate::error::NavError;

/// One upstream NAV record, exactly as delivered: a `DD-MM-YYYY` date string
/// and a decimal NAV string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawNavRecord {
    /// Publication date, `DD-MM-YYYY`.
    pub date: String,
    /// Net asset value per unit, as text.
    pub nav: String,
}

impl RawNavRecord {
    /// Creates a raw record.
    pub fn new(date: impl Into<String>, nav: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            nav: nav.into(),
        }
    }

    /// Parses the record into a validated point.
    ///
    /// Returns `None` when the date is not a valid `DD-MM-YYYY` date or the NAV
    /// is not a finite positive number.
    #[must_use]
    pub fn parse(&self) -> Option<NavPoint> {
        let date = Date::parse_dmy(&self.date).ok()?;
        let nav = self.nav.trim().parse::<f64>().ok()?;
        NavPoint::new(date, nav).ok()
    }
}

/// A validated NAV observation.
///
/// The NAV is always finite and strictly positive; there is no way to build
/// a `NavPoint` that violates this, including through deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "NavPointRepr")]
pub struct NavPoint {
    date: Date,
    nav: f64,
}

impl NavPoint {
    /// Creates a NAV point.
    ///
    /// # Errors
    ///
    /// Returns `NavError::InvalidNav` if `nav` is NaN, infinite, zero or negative.
    pub fn new(date: Date, nav: f64) -> Result<Self, NavError> {
        if !nav.is_finite() {
            return Err(NavError::invalid_nav(nav, "must be finite"));
        }
        if nav <= 0.0 {
            return Err(NavError::invalid_nav(nav, "must be positive"));
        }
        Ok(Self { date, nav })
    }

    /// Publication date of this NAV.
    #[must_use]
    pub fn date(&self) -> Date {
        self.date
    }

    /// Net asset value per unit.
    #[must_use]
    pub fn nav(&self) -> f64 {
        self.nav
    }
}

impl fmt::Display for NavPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.date, self.nav)
    }
}

#[derive(Deserialize)]
struct NavPointRepr {
    date: Date,
    nav: f64,
}

impl TryFrom<NavPointRepr> for NavPoint {
    type Error = NavError;

    fn try_from(repr: NavPointRepr) -> Result<Self, Self::Error> {
        NavPoint::new(repr.date, repr.nav)
    }
}
