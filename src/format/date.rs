use super::FormatError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Render an API date as `Jan 5, 2024`.
///
/// Accepts RFC 3339 timestamps, naive `YYYY-MM-DDTHH:MM:SS[.fff]` timestamps
/// and plain `YYYY-MM-DD` dates. Timestamps keep the calendar date they were
/// written in.
pub fn format_date(input: &str) -> Result<String, FormatError> {
    parse_date(input)
        .map(format_naive_date)
        .ok_or_else(|| FormatError::InvalidDate(input.to_string()))
}

fn format_naive_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Some(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(timestamp.date());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
