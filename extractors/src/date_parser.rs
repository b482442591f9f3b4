use chrono::{DateTime, NaiveDateTime};
use shared_types::TrackerError;
use std::fmt;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const DATE_FORMAT: &str = "%d %b %Y %H:%M:%S %z";
const NORMALIZED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock time of a message as written in its Date header, offset discarded.
///
/// Ordering is chronological on that wall-clock value, which matches the ordering of the
/// `YYYY-MM-DD HH:MM:SS` text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedDate(NaiveDateTime);

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(NORMALIZED_FORMAT))
    }
}

/// Parses a provider Date header such as `Mon, 02 Jan 2023 15:04:05 -0700 (MST)`.
///
/// Anything from the first `" ("` on is dropped before parsing. The weekday must be a valid
/// abbreviation but is not checked against the calendar date.
pub fn normalize_date(raw_date: &str) -> Result<NormalizedDate, TrackerError> {
    let cleaned = raw_date.split(" (").next().unwrap_or(raw_date);

    parse_without_weekday(cleaned).map_err(|reason| {
        tracing::error!("Error parsing date: {} -> {}", raw_date, reason);
        TrackerError::DateParse {
            input: raw_date.to_string(),
            reason,
        }
    })
}

fn parse_without_weekday(cleaned: &str) -> Result<NormalizedDate, String> {
    let (weekday, rest) = cleaned
        .split_once(", ")
        .ok_or_else(|| "missing weekday".to_string())?;

    if !WEEKDAYS.iter().any(|day| day.eq_ignore_ascii_case(weekday)) {
        return Err(format!("invalid weekday '{}'", weekday));
    }

    DateTime::parse_from_str(rest, DATE_FORMAT)
        .map(|parsed| NormalizedDate(parsed.naive_local()))
        .map_err(|e| e.to_string())
}
