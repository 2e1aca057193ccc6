//! # NavCalc Core
//!
//! Core types and building blocks for NAV-based return analytics.
//!
//! - **Types**: [`Date`], [`NavPoint`], [`RawNavRecord`], [`Cadence`]
//! - **Normalization**: [`NavSeries`] turns raw upstream records into a
//!   validated, ascending series
//! - **Resolution**: [`resolver`] maps any calendar date to the NAV to use
//! - **Schedules**: [`schedule`] generates installment dates with month-end
//!   clamping
//!
//! Everything here is pure: no I/O, no shared state, no interior mutability.
//!
//! ## Example
//!
//! ```rust
//! use navcalc_core::prelude::*;
//!
//! let raw = vec![
//!     RawNavRecord::new("31-01-2023", "110.0"),
//!     RawNavRecord::new("02-01-2023", "100.0"),
//! ];
//! let series = NavSeries::from_raw(&raw);
//!
//! let target = Date::from_ymd(2023, 1, 15).unwrap();
//! assert_eq!(series.resolve(target).unwrap().nav(), 100.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod resolver;
pub mod schedule;
pub mod series;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{NavError, NavResult};
    pub use crate::resolver::{resolve_nav, resolve_nav_detailed, MatchKind, Resolution};
    pub use crate::schedule::{generate_schedule, Schedule};
    pub use crate::series::NavSeries;
    pub use crate::types::{Cadence, Date, NavPoint, RawNavRecord};
}

// Re-export commonly used types at crate root
pub use error::{NavError, NavResult};
pub use series::NavSeries;
pub use types::{Cadence, Date, NavPoint, RawNavRecord};
