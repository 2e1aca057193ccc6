//! # NavCalc Returns
//!
//! Valuation of mutual-fund investments against a [`NavSeries`](navcalc_core::NavSeries):
//!
//! - **SIP**: [`compute_sip`] invests a fixed amount on every scheduled date
//! - **Lump-sum**: [`compute_lumpsum`] values a single purchase
//! - **Point-to-point**: [`compute_holding_period_return`] and the preset
//!   trailing periods in [`period`]
//!
//! Every annualized figure goes through [`annualize::annualize`], so the
//! same inputs always produce the same rate regardless of entry point.
//!
//! Requests that cannot be answered from the data return
//! [`ValuationOutcome::NeedsReview`] rather than an error or a panic.
//!
//! ## Example
//!
//! ```rust
//! use navcalc_core::{Cadence, Date, NavSeries};
//! use navcalc_returns::prelude::*;
//!
//! let d = |m, day| Date::from_ymd(2023, m, day).unwrap();
//! let series = NavSeries::from_pairs([(d(1, 2), 10.0), (d(2, 1), 12.5), (d(3, 1), 10.0)]);
//!
//! let outcome = compute_sip(&series, 100.0, Cadence::Monthly, d(1, 2), d(3, 2));
//! match outcome {
//!     ValuationOutcome::Computed(v) => assert_eq!(v.installments(), 3),
//!     ValuationOutcome::NeedsReview(review) => panic!("{review}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod annualize;
pub mod holding;
pub mod lumpsum;
pub mod outcome;
pub mod period;
pub mod sip;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::annualize::{annualize, years_between, DAYS_PER_YEAR};
    pub use crate::holding::{compute_holding_period_return, HoldingPeriodReturn};
    pub use crate::lumpsum::{compute_lumpsum, LumpsumPlan};
    pub use crate::outcome::{
        InstallmentSnapshot, Review, ReviewReason, Valuation, ValuationOutcome, ValuePoint,
    };
    pub use crate::period::{compute_period_returns, HoldingPeriod, PeriodReturn};
    pub use crate::sip::{clamp_range_to_series, compute_sip, SipPlan};
}

pub use holding::{compute_holding_period_return, HoldingPeriodReturn};
pub use lumpsum::{compute_lumpsum, LumpsumPlan};
pub use outcome::{Review, ReviewReason, Valuation, ValuationOutcome};
pub use period::{compute_period_return, compute_period_returns, HoldingPeriod, PeriodReturn};
pub use sip::{clamp_range_to_series, compute_sip, SipPlan};
