//! Canonical calendar date handling.
//!
//! # Responsibility
//! - Own the single parse routine and the single format routine for dates.
//! - Keep every comparison on `NaiveDate`, never on wall-clock time.
//!
//! # Invariants
//! - Accepted text is exactly `YYYY-MM-DD` and names a real calendar day.
//! - Supported years are `0001..=9999`, so the formatted form sorts
//!   lexicographically in chronological order.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar date type shared by intervals, bookings and storage.
pub type CalendarDate = NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";
const MIN_SUPPORTED_YEAR: i32 = 1;
const MAX_SUPPORTED_YEAR: i32 = 9999;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid iso date regex"));

/// Date parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    /// Text is not shaped like `YYYY-MM-DD`.
    Malformed(String),
    /// Shape is right but the day does not exist (e.g. `2025-02-30`).
    NotACalendarDay(String),
    /// Parsed date lies outside the supported year range.
    OutOfRange(String),
}

impl Display for DateParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => write!(f, "date `{value}` is not in YYYY-MM-DD form"),
            Self::NotACalendarDay(value) => write!(f, "date `{value}` is not a calendar day"),
            Self::OutOfRange(value) => write!(
                f,
                "date `{value}` is outside supported years {MIN_SUPPORTED_YEAR}..={MAX_SUPPORTED_YEAR}"
            ),
        }
    }
}

impl Error for DateParseError {}

/// Parses one `YYYY-MM-DD` calendar date.
///
/// Surrounding whitespace is ignored; nothing else is.
pub fn parse_calendar_date(value: &str) -> Result<CalendarDate, DateParseError> {
    let trimmed = value.trim();
    if !ISO_DATE_RE.is_match(trimmed) {
        return Err(DateParseError::Malformed(trimmed.to_string()));
    }

    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| DateParseError::NotACalendarDay(trimmed.to_string()))?;
    if !is_supported_date(date) {
        return Err(DateParseError::OutOfRange(trimmed.to_string()));
    }
    Ok(date)
}

/// Formats one date as `YYYY-MM-DD`.
pub fn format_calendar_date(date: CalendarDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Returns whether `date` falls inside the supported year range.
pub fn is_supported_date(date: CalendarDate) -> bool {
    (MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&date.year())
}
