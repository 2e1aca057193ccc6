//! Valuation results.
//!
//! A valuation either produces figures ([`Valuation`]) or a structured
//! rejection ([`Review`]) telling the caller the request cannot be answered
//! from the data at hand. Rejections are expected states (short histories,
//! future ranges, bad user input), not faults.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use navcalc_core::Date;

/// One installment in a plan's timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentSnapshot {
    /// Date of the NAV the installment was priced at.
    pub date: Date,
    /// Date the installment was scheduled for.
    pub scheduled_date: Date,
    /// NAV used to buy units.
    pub nav_used: f64,
    /// Units bought by this installment.
    pub units_bought: f64,
    /// Units held after this installment.
    pub cumulative_units: f64,
    /// Capital invested up to and including this installment.
    pub cumulative_invested: f64,
    /// `cumulative_units × nav_used`.
    pub value_at_that_date: f64,
}

/// Holding value on one NAV date, for charting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    /// NAV publication date.
    pub date: Date,
    /// NAV on that date.
    pub nav: f64,
    /// Units held on that date.
    pub units_held: f64,
    /// Capital invested by that date.
    pub invested: f64,
    /// `units_held × nav`.
    pub value: f64,
}

/// Figures for a successfully valued investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Valuation {
    /// Total capital invested.
    pub total_invested: f64,
    /// Value of all units at the valuation NAV.
    pub current_value: f64,
    /// Units held.
    pub total_units: f64,
    /// `(current_value − total_invested) / total_invested × 100`.
    pub absolute_return_pct: f64,
    /// Annualized return; see [`crate::annualize`].
    pub annualized_return_pct: f64,
    /// Per-installment snapshots, in schedule order.
    pub timeline: Vec<InstallmentSnapshot>,
    /// Value of the holding on every NAV date in the requested range.
    pub value_series: Vec<ValuePoint>,
}

impl Valuation {
    /// Profit or loss in currency terms.
    #[must_use]
    pub fn gain(&self) -> f64 {
        self.current_value - self.total_invested
    }

    /// Number of installments that were actually invested.
    #[must_use]
    pub fn installments(&self) -> usize {
        self.timeline.len()
    }
}

/// Why a request could not be valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewReason {
    /// The start date is after the end date.
    InvertedRange,
    /// The investment amount is zero, negative or not a number.
    NonPositiveAmount,
    /// A required NAV could not be resolved (empty series).
    MissingNav,
    /// No scheduled installment could be matched to a NAV.
    NoInstallments,
}

impl fmt::Display for ReviewReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReviewReason::InvertedRange => "inverted range",
            ReviewReason::NonPositiveAmount => "non-positive amount",
            ReviewReason::MissingNav => "missing NAV",
            ReviewReason::NoInstallments => "no installments",
        };
        write!(f, "{name}")
    }
}

/// A structured rejection: the `needs_review` result.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct Review {
    /// Machine-readable reason.
    pub reason: ReviewReason,
    /// Human-readable explanation.
    pub message: String,
}

impl Review {
    /// Creates a review with an explicit message.
    #[must_use]
    pub fn new(reason: ReviewReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: message.into(),
        }
    }

    /// Start date after end date.
    #[must_use]
    pub fn inverted_range(start: Date, end: Date) -> Self {
        Self::new(
            ReviewReason::InvertedRange,
            format!("Invalid date range: start {start} is after end {end}."),
        )
    }

    /// Amount that is not a positive number.
    #[must_use]
    pub fn non_positive_amount(amount: f64) -> Self {
        Self::new(
            ReviewReason::NonPositiveAmount,
            format!("Investment amount must be positive, got {amount}."),
        )
    }

    /// No NAV available for a required date.
    #[must_use]
    pub fn missing_nav(date: Date) -> Self {
        Self::new(
            ReviewReason::MissingNav,
            format!("No NAV data available to price {date}."),
        )
    }

    /// Nothing could be invested.
    #[must_use]
    pub fn no_installments() -> Self {
        Self::new(
            ReviewReason::NoInstallments,
            "No valid investment dates found or insufficient data.",
        )
    }
}

/// Result of a SIP or lump-sum valuation.
///
/// Serializes with a `status` tag: `{"status": "computed", ...}` or
/// `{"status": "needs_review", "reason": ..., "message": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValuationOutcome {
    /// The investment was valued.
    Computed(Valuation),
    /// The request cannot be computed from the available data.
    NeedsReview(Review),
}

impl ValuationOutcome {
    /// Returns true if figures were produced.
    #[must_use]
    pub fn is_computed(&self) -> bool {
        matches!(self, ValuationOutcome::Computed(_))
    }

    /// Returns true for a `needs_review` outcome.
    #[must_use]
    pub fn needs_review(&self) -> bool {
        matches!(self, ValuationOutcome::NeedsReview(_))
    }

    /// The valuation, if computed.
    #[must_use]
    pub fn valuation(&self) -> Option<&Valuation> {
        match self {
            ValuationOutcome::Computed(valuation) => Some(valuation),
            ValuationOutcome::NeedsReview(_) => None,
        }
    }

    /// The review, if rejected.
    #[must_use]
    pub fn review(&self) -> Option<&Review> {
        match self {
            ValuationOutcome::Computed(_) => None,
            ValuationOutcome::NeedsReview(review) => Some(review),
        }
    }

    /// Converts into a `Result`, treating a review as the error.
    pub fn into_result(self) -> Result<Valuation, Review> {
        match self {
            ValuationOutcome::Computed(valuation) => Ok(valuation),
            ValuationOutcome::NeedsReview(review) => Err(review),
        }
    }
}

impl From<Review> for ValuationOutcome {
    fn from(review: Review) -> Self {
        ValuationOutcome::NeedsReview(review)
    }
}

impl From<Valuation> for ValuationOutcome {
    fn from(valuation: Valuation) -> Self {
        ValuationOutcome::Computed(valuation)
    }
}
