use chrono::{NaiveDate, NaiveDateTime};

use recap_core::recap::RecapKind;

/// Parse recap kind from string
pub fn parse_recap_kind(s: &str) -> std::result::Result<RecapKind, String> {
    s.parse::<RecapKind>().map_err(|e| e.to_string())
}

/// Parse a calendar date (YYYY-MM-DD)
pub fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("invalid date {:?} (expected YYYY-MM-DD): {}", s, e))
}

/// Parse a local timestamp (YYYY-MM-DDTHH:MM, seconds optional)
pub fn parse_datetime(s: &str) -> std::result::Result<NaiveDateTime, String> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|e| format!("invalid time {:?} (expected YYYY-MM-DDTHH:MM): {}", s, e))
}
