/// Pure date/time utility functions
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// A stored birth date that none of the accepted formats could read
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognized birth date '{0}'")]
pub struct BirthDateError(pub String);

/// Years between a stored birth year and the current year.
/// Display value only; placeholder years give odd results.
pub fn calculate_years(birth_year: i32, current_year: i32) -> i32 {
    current_year - birth_year
}

/// Parse a birth date stored as `YYYY-MM-DD`, an RFC 3339 timestamp, or the
/// legacy `Fri Jun 08 00:00:00 UTC 1990` form
pub fn parse_birth_date(raw: &str) -> Result<NaiveDate, BirthDateError> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.date_naive());
    }

    parse_legacy_date(raw).ok_or_else(|| BirthDateError(raw.to_string()))
}

/// The zone abbreviation is dropped; only the calendar date is kept
fn parse_legacy_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split_whitespace().collect();
    let [weekday, month, day, time, _zone, year] = parts.as_slice() else {
        return None;
    };

    let without_zone = format!("{} {} {} {} {}", weekday, month, day, time, year);
    NaiveDateTime::parse_from_str(&without_zone, "%a %b %d %H:%M:%S %Y")
        .ok()
        .map(|datetime| datetime.date())
}

/// Format a date as "Day MonthName" (e.g., "15 March")
pub fn format_date_display(month: u32, day: u32) -> String {
    let month_name = get_month_name(month);
    format!("{} {}", day, month_name)
}

/// Get month name from month number (1-12)
pub fn get_month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}
