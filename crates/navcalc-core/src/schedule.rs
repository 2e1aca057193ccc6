//! Installment schedule generation.

use crate::types::{Cadence, Date};

/// Iterator over the installment dates of a systematic plan.
///
/// The k-th date is `start + k × cadence.months_per_step()` months. Stepping
/// from the start date (rather than from the previous, possibly clamped,
/// date) keeps the original day-of-month: a plan started on the 31st invests
/// on Feb 28 and then again on Mar 31.
#[derive(Debug, Clone)]
pub struct Schedule {
    start: Date,
    end: Date,
    step_months: i32,
    index: i32,
    finished: bool,
}

impl Schedule {
    /// Creates a schedule from `start` to `end` (inclusive).
    #[must_use]
    pub fn new(start: Date, end: Date, cadence: Cadence) -> Self {
        Self {
            start,
            end,
            step_months: cadence.months_per_step() as i32,
            index: 0,
            finished: start > end,
        }
    }
}

impl Iterator for Schedule {
    type Item = Date;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let next = self
            .index
            .checked_mul(self.step_months)
            .and_then(|months| self.start.add_months(months).ok())
            .filter(|date| *date <= self.end);

        match next {
            Some(date) => {
                self.index += 1;
                Some(date)
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl std::iter::FusedIterator for Schedule {}

/// Generates the ascending installment dates from `start` through `end`.
///
/// Returns an empty schedule when `start > end`.
///
/// # Example
///
/// ```rust
/// use navcalc_core::schedule::generate_schedule;
/// use navcalc_core::types::{Cadence, Date};
///
/// let dates = generate_schedule(
///     Date::from_ymd(2023, 1, 31).unwrap(),
///     Date::from_ymd(2023, 4, 30).unwrap(),
///     Cadence::Monthly,
/// );
/// let days: Vec<u32> = dates.iter().map(|d| d.day()).collect();
/// assert_eq!(days, vec![31, 28, 31, 30]);
/// ```
#[must_use]
pub fn generate_schedule(start: Date, end: Date, cadence: Cadence) -> Vec<Date> {
    Schedule::new(start, end, cadence).collect()
}
