//! Date and range resolution for evidence queries
//!
//! Query expressions like `last-90-days`, `2025-Q1`, `2025`, or explicit
//! `YYYY-MM-DD:YYYY-MM-DD` bounds resolve to a `(start, end)` pair. An
//! unrecognized expression resolves to `(None, None)`, which callers must
//! treat as "no constraint", never as an empty interval.
//!
//! Anything that depends on the current date takes it as an explicit
//! parameter; the `*_now` wrappers supply `Utc::now()` at the CLI boundary.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Resolved date bounds; `None` on either side means unbounded
pub type DateBounds = (Option<NaiveDate>, Option<NaiveDate>);

static LAST_DAYS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^last-(\d+)-days?").expect("invalid last-days pattern"));

static LAST_MONTHS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^last-(\d+)-months?").expect("invalid last-months pattern"));

static QUARTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-Q([1-4])").expect("invalid quarter pattern"));

static BARE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}$").expect("invalid year pattern"));

static FILENAME_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2})").expect("invalid filename-date pattern"));

/// Resolve a date-range expression against today's date
pub fn parse_date_range(expr: &str) -> DateBounds {
    parse_date_range_from(expr, Utc::now().date_naive())
}

/// Resolve a date-range expression against an explicit reference date
///
/// Recognized forms, in priority order:
/// - `last-N-days` / `last-N-months` (months approximated as 30 days each)
/// - `YYYY-QN` (exact calendar quarter)
/// - `YYYY` (Jan 1 through Dec 31)
/// - `YYYY-MM-DD:YYYY-MM-DD` (explicit bounds)
///
/// Anything else resolves to `(None, None)`: no constraint.
pub fn parse_date_range_from(expr: &str, today: NaiveDate) -> DateBounds {
    if let Some(caps) = LAST_DAYS.captures(expr) {
        if let Ok(days) = caps[1].parse::<i64>() {
            return (Some(today - Duration::days(days)), Some(today));
        }
        return (None, None);
    }

    if let Some(caps) = LAST_MONTHS.captures(expr) {
        if let Ok(months) = caps[1].parse::<i64>() {
            // 30 days per month, a deliberate approximation
            return (Some(today - Duration::days(months * 30)), Some(today));
        }
        return (None, None);
    }

    if let Some(caps) = QUARTER.captures(expr) {
        if let (Ok(year), Ok(quarter)) = (caps[1].parse::<i32>(), caps[2].parse::<u32>()) {
            return quarter_bounds(year, quarter);
        }
        return (None, None);
    }

    if BARE_YEAR.is_match(expr) {
        if let Ok(year) = expr.parse::<i32>() {
            return (
                NaiveDate::from_ymd_opt(year, 1, 1),
                NaiveDate::from_ymd_opt(year, 12, 31),
            );
        }
        return (None, None);
    }

    if expr.contains(':') {
        let parts: Vec<&str> = expr.split(':').collect();
        if parts.len() == 2 {
            let start = NaiveDate::parse_from_str(parts[0].trim(), "%Y-%m-%d");
            let end = NaiveDate::parse_from_str(parts[1].trim(), "%Y-%m-%d");
            if let (Ok(start), Ok(end)) = (start, end) {
                return (Some(start), Some(end));
            }
        }
        return (None, None);
    }

    (None, None)
}

/// First and last day of a calendar quarter
fn quarter_bounds(year: i32, quarter: u32) -> DateBounds {
    let start_month = (quarter - 1) * 3 + 1;
    let end_month = quarter * 3;

    let start = NaiveDate::from_ymd_opt(year, start_month, 1);
    let end = if end_month == 12 {
        NaiveDate::from_ymd_opt(year, 12, 31)
    } else {
        // Last day of the quarter: first of the next month, minus one day
        NaiveDate::from_ymd_opt(year, end_month + 1, 1).map(|d| d - Duration::days(1))
    };

    match (start, end) {
        (Some(start), Some(end)) => (Some(start), Some(end)),
        _ => (None, None),
    }
}

/// Extract a leading `YYYY-MM-DD` token from a filename
///
/// The token is returned as matched; it is not validated as a real calendar
/// date (the scanner's date filter handles unparseable values separately).
pub fn extract_date_from_filename(name: &str) -> Option<String> {
    FILENAME_DATE
        .captures(name)
        .map(|caps| caps[1].to_string())
}

/// Quarter label for a date, e.g. `"2025-Q4"`
pub fn quarter_label(date: NaiveDate) -> String {
    format!("{}-Q{}", date.year(), (date.month() - 1) / 3 + 1)
}

/// Check a role-date string: `YYYY-MM` or `"present"`
pub fn is_valid_month_format(date_str: &str) -> bool {
    static MONTH: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("invalid month pattern"));
    date_str.eq_ignore_ascii_case("present") || MONTH.is_match(date_str)
}

/// Parse an ISO `YYYY-MM-DD` string, `None` on failure
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
