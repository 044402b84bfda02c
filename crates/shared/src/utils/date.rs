use chrono::{DateTime, NaiveDate, Utc};

/// Human readable date used in every response, e.g. `Mon Jan 02 2023`
pub const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Parses a client supplied date. Accepts a calendar date (`2023-01-02`),
/// which is taken as midnight UTC, or a full RFC 3339 timestamp.
pub fn parse_date<T: AsRef<str>>(value: T) -> Option<DateTime<Utc>> {
    let value = value.as_ref().trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn display_date(date: &DateTime<Utc>) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}
