//! Half-open stay interval.
//!
//! # Responsibility
//! - Represent one `[check_in, check_out)` stay window.
//! - Provide the overlap predicate shared by availability and storage guards.
//!
//! # Invariants
//! - `start < end` always holds for a constructed `DateInterval`.
//! - Both dates are inside the supported calendar range.
//! - Touching intervals (`a.end == b.start`) do not overlap.

use crate::model::date::{
    format_calendar_date, is_supported_date, parse_calendar_date, CalendarDate, DateParseError,
};
use chrono::Days;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Interval construction failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// `start >= end`.
    Empty {
        start: CalendarDate,
        end: CalendarDate,
    },
    /// One of the dates is outside the supported calendar range.
    OutOfRange(CalendarDate),
    /// One of the textual dates failed to parse.
    Date(DateParseError),
}

impl Display for IntervalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty { start, end } => write!(
                f,
                "check-out {} must be after check-in {}",
                format_calendar_date(*end),
                format_calendar_date(*start)
            ),
            Self::OutOfRange(date) => write!(f, "date {date} is outside the supported range"),
            Self::Date(err) => write!(f, "{err}"),
        }
    }
}

impl Error for IntervalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Date(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DateParseError> for IntervalError {
    fn from(value: DateParseError) -> Self {
        Self::Date(value)
    }
}

/// Non-empty half-open date interval `[start, end)`.
///
/// Serialized as `{ "checkIn": "YYYY-MM-DD", "checkOut": "YYYY-MM-DD" }`.
/// Deserialization goes through [`DateInterval::parse`], so a decoded value
/// always upholds the constructor invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "IntervalWire", try_from = "IntervalWire")]
pub struct DateInterval {
    start: CalendarDate,
    end: CalendarDate,
}

impl DateInterval {
    /// Builds an interval, rejecting empty or reversed ranges.
    pub fn new(start: CalendarDate, end: CalendarDate) -> Result<Self, IntervalError> {
        for date in [start, end] {
            if !is_supported_date(date) {
                return Err(IntervalError::OutOfRange(date));
            }
        }
        if start >= end {
            return Err(IntervalError::Empty { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses `check_in`/`check_out` text through the canonical date parser.
    pub fn parse(check_in: &str, check_out: &str) -> Result<Self, IntervalError> {
        let start = parse_calendar_date(check_in)?;
        let end = parse_calendar_date(check_out)?;
        Self::new(start, end)
    }

    /// Builds `[start, start + nights)`.
    ///
    /// Returns `None` for zero nights or when the end date is not representable.
    pub fn starting_at(start: CalendarDate, nights: u32) -> Option<Self> {
        if nights == 0 {
            return None;
        }
        let end = start.checked_add_days(Days::new(u64::from(nights)))?;
        Self::new(start, end).ok()
    }

    /// Check-in date (inclusive).
    pub fn start(&self) -> CalendarDate {
        self.start
    }

    /// Check-out date (exclusive).
    pub fn end(&self) -> CalendarDate {
        self.end
    }

    /// Number of nights covered by this stay. Always at least 1.
    pub fn nights(&self) -> u32 {
        let days = (self.end - self.start).num_days();
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Returns whether this interval shares at least one night with `other`.
    pub fn overlaps(&self, other: &DateInterval) -> bool {
        overlaps(self, other)
    }
}

impl Display for DateInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {})",
            format_calendar_date(self.start),
            format_calendar_date(self.end)
        )
    }
}

/// Half-open overlap test: `a.start < b.end && b.start < a.end`.
pub fn overlaps(a: &DateInterval, b: &DateInterval) -> bool {
    a.start < b.end && b.start < a.end
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IntervalWire {
    check_in: String,
    check_out: String,
}

impl From<DateInterval> for IntervalWire {
    fn from(value: DateInterval) -> Self {
        Self {
            check_in: format_calendar_date(value.start),
            check_out: format_calendar_date(value.end),
        }
    }
}

impl TryFrom<IntervalWire> for DateInterval {
    type Error = IntervalError;

    fn try_from(value: IntervalWire) -> Result<Self, Self::Error> {
        Self::parse(&value.check_in, &value.check_out)
    }
}
