//! Time window helpers
//!
//! All date→timestamp conversion happens at the service layer; the
//! repository layer only receives `i64` Unix millis (for sale dates) or
//! ISO `YYYY-MM-DD` strings (for booking dates). Window boundaries use
//! `>= start, < end` semantics.

use chrono::{Datelike, Duration, NaiveDate};

use super::{AppError, AppResult};

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}")))
}

/// Day start (00:00:00 UTC) → Unix millis
pub fn day_start_millis(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp_millis()
}

/// Day end → next day 00:00:00 Unix millis; callers use `< end` (exclusive)
pub fn day_end_millis(date: NaiveDate) -> i64 {
    day_start_millis(date.succ_opt().unwrap_or(date))
}

/// First day of the date's month
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// January 1st of the date's year
pub fn year_start(date: NaiveDate) -> NaiveDate {
    date.with_ordinal(1).unwrap_or(date)
}

/// Monday of the date's week
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Parse a month filter string (YYYY-MM) into a `[start, end)` millis window.
///
/// Returns `None` on malformed input — the list views ignore a bad filter
/// rather than failing the whole request.
pub fn parse_month_window(month: &str) -> Option<(i64, i64)> {
    let (year, month) = month.split_once('-')?;
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((day_start_millis(start), day_start_millis(end)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_start_is_monday() {
        // 2026-08-24 is a Monday
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(week_start(monday), monday);
        let thursday = NaiveDate::from_ymd_opt(2026, 8, 27).unwrap();
        assert_eq!(week_start(thursday), monday);
    }

    #[test]
    fn test_month_window_december_rolls_over() {
        let (start, end) = parse_month_window("2025-12").unwrap();
        assert_eq!(start, day_start_millis(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()));
        assert_eq!(end, day_start_millis(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()));
    }

    #[test]
    fn test_month_window_rejects_garbage() {
        assert!(parse_month_window("garbage").is_none());
        assert!(parse_month_window("2025-13").is_none());
        assert!(parse_month_window("2025").is_none());
    }

    #[test]
    fn test_day_window_is_exclusive_end() {
        let d = NaiveDate::from_ymd_opt(2026, 2, 28).unwrap();
        assert_eq!(day_end_millis(d), day_start_millis(d) + 24 * 3600 * 1000);
    }
}
