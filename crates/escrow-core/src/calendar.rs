//! Month-bucket date arithmetic for the analysis window.
//!
//! Escrow projections operate on whole calendar months: every date is
//! normalized to the first of its month and occurrences are bucketed by a
//! 1-based month index relative to the window start. Day-of-month billing
//! alignment is deliberately out of scope.

use chrono::{Datelike, Months, NaiveDate};

/// Length of the analysis window in months.
pub const ANALYSIS_MONTHS: usize = 12;

/// Normalize a date to day 1 of its month.
pub fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// Advance a date by `n` calendar months, normalized to day 1.
///
/// Day-of-month is not preserved. Year overflow clamps to chrono's date
/// range rather than panicking.
pub fn add_months(d: NaiveDate, n: u32) -> NaiveDate {
    first_of_month(d)
        .checked_add_months(Months::new(n))
        .unwrap_or(NaiveDate::MAX)
}

/// 1-based month index of `d` relative to `window_start`'s month.
///
/// Index 1 is the window start month. The result is signed; callers clip to
/// `1..=ANALYSIS_MONTHS`.
pub fn month_index(window_start: NaiveDate, d: NaiveDate) -> i64 {
    let years = i64::from(d.year()) - i64::from(window_start.year());
    let months = i64::from(d.month()) - i64::from(window_start.month());
    years * 12 + months + 1
}

/// Lenient ISO `YYYY-MM-DD` parse. Unparseable input yields `None` so the
/// caller can fall back to "no charge produced" instead of failing.
pub fn parse_ymd(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}
