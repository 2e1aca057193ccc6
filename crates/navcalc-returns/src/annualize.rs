//! Annualization of holding-period returns.
//!
//! One convention for every calculation in this crate:
//!
//! - elapsed years are calendar days divided by [`DAYS_PER_YEAR`] (365.25);
//! - for one year or more the annualized return is the CAGR,
//!   `(M^(1/years) − 1) × 100`;
//! - under one year it is the plain holding-period return, `(M − 1) × 100`.
//!   Short-horizon performance is never extrapolated to a yearly rate, so a
//!   5% gain over two weeks is reported as 5%, not as ~250%.
//!
//! At exactly one year both branches agree, so the switch is continuous.

/// Days per year, averaging in leap years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Converts a number of calendar days to years.
#[must_use]
pub fn years_between(elapsed_days: i64) -> f64 {
    elapsed_days as f64 / DAYS_PER_YEAR
}

/// Converts a growth multiple (`end / start`) into a percentage return.
///
/// A multiple of 1.1 is a 10% return.
#[must_use]
pub fn growth_to_pct(multiple: f64) -> f64 {
    (multiple - 1.0) * 100.0
}

/// Percentage change from `start` to `end`.
///
/// Returns 0 when `start` is zero; NAVs and invested amounts reaching this
/// function are positive by construction.
#[must_use]
pub fn percent_change(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        return 0.0;
    }
    growth_to_pct(end / start)
}

/// Annualizes a growth multiple over `elapsed_days`.
///
/// Sub-year horizons (including zero and negative spans) return the simple
/// return unchanged. A non-positive multiple is a total loss and returns −100.
///
/// # Example
///
/// ```rust
/// use navcalc_returns::annualize::annualize;
///
/// // Doubling over two years is ~41.4% a year.
/// let cagr = annualize(2.0, 731);
/// assert!((cagr - 41.39).abs() < 0.01);
///
/// // 10% in a month stays 10%.
/// assert!((annualize(1.1, 30) - 10.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn annualize(multiple: f64, elapsed_days: i64) -> f64 {
    if multiple <= 0.0 {
        return -100.0;
    }

    let years = years_between(elapsed_days);
    if years >= 1.0 {
        growth_to_pct(multiple.powf(1.0 / years))
    } else {
        growth_to_pct(multiple)
    }
}
