//! Request validation shared by the valuation entry points.

use navcalc_core::Date;

use crate::outcome::Review;

/// Rejects an inverted range.
///
/// Same-day ranges are valid: a plan that starts and ends on one day invests
/// once and is valued at that day's NAV.
pub fn validate_range(start: Date, end: Date) -> Result<(), Review> {
    if start > end {
        return Err(Review::inverted_range(start, end));
    }
    Ok(())
}

/// Rejects an amount that is not a finite positive number.
pub fn validate_amount(amount: f64) -> Result<(), Review> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Review::non_positive_amount(amount));
    }
    Ok(())
}

/// Validates a complete request.
pub fn validate_request(amount: f64, start: Date, end: Date) -> Result<(), Review> {
    validate_range(start, end)?;
    validate_amount(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ReviewReason;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_range() {
        assert!(validate_range(date(2023, 1, 1), date(2023, 1, 1)).is_ok());
        assert!(validate_range(date(2023, 1, 1), date(2023, 6, 1)).is_ok());

        let err = validate_range(date(2023, 6, 1), date(2023, 1, 1)).unwrap_err();
        assert_eq!(err.reason, ReviewReason::InvertedRange);
    }

    #[test]
    fn test_amount() {
        assert!(validate_amount(0.01).is_ok());
        for bad in [0.0, -100.0, f64::NAN, f64::INFINITY] {
            let err = validate_amount(bad).unwrap_err();
            assert_eq!(err.reason, ReviewReason::NonPositiveAmount);
        }
    }

    #[test]
    fn test_range_is_checked_first() {
        let err = validate_request(-1.0, date(2023, 6, 1), date(2023, 1, 1)).unwrap_err();
        assert_eq!(err.reason, ReviewReason::InvertedRange);
    }
}
