//! Domain types for NAV analytics.
//!
//! - [`Date`]: Pure calendar date
//! - [`NavPoint`]: Validated NAV observation
//! - [`RawNavRecord`]: Unparsed upstream record
//! - [`Cadence`]: Installment frequency of a systematic plan

mod cadence;
mod date;
mod nav;

pub use cadence::Cadence;
pub use date::{Date, ISO_DATE_FORMAT, UPSTREAM_DATE_FORMAT};
pub use nav::{NavPoint, RawNavRecord};
