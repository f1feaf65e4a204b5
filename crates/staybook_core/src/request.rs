//! Boundary decoding for availability and booking requests.
//!
//! # Responsibility
//! - Turn raw string payloads into typed `UnitId` + `DateInterval` values.
//! - Produce client-facing messages for rejected input.
//!
//! # Invariants
//! - Nothing downstream of `validate()` ever sees an unparsed date.
//! - Required-field checks run before date parsing.

use crate::model::booking::NewBooking;
use crate::model::date::{parse_calendar_date, DateParseError};
use crate::model::interval::DateInterval;
use crate::model::unit::UnitId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Rejected client input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// One of `unit`, `checkIn`, `checkOut` is missing or blank.
    MissingField(&'static str),
    /// A date field failed canonical parsing.
    InvalidDate {
        field: &'static str,
        source: DateParseError,
    },
    /// `checkOut` is not after `checkIn`.
    InvalidRange,
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "unit, checkIn, checkOut are required (missing `{field}`)")
            }
            Self::InvalidDate { field, source } => write!(f, "invalid `{field}`: {source}"),
            Self::InvalidRange => write!(f, "check-out must be after check-in"),
        }
    }
}

impl Error for InputError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidDate { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Raw availability query as received from a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AvailabilityQuery {
    pub unit: String,
    pub check_in: String,
    pub check_out: String,
}

/// Raw booking insert request as received from an operator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateBookingRequest {
    pub unit: String,
    pub check_in: String,
    pub check_out: String,
}

impl AvailabilityQuery {
    pub fn new(
        unit: impl Into<String>,
        check_in: impl Into<String>,
        check_out: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            check_in: check_in.into(),
            check_out: check_out.into(),
        }
    }

    /// Decodes this query into typed values.
    pub fn validate(&self) -> Result<(UnitId, DateInterval), InputError> {
        decode_stay(&self.unit, &self.check_in, &self.check_out)
    }
}

impl CreateBookingRequest {
    pub fn new(
        unit: impl Into<String>,
        check_in: impl Into<String>,
        check_out: impl Into<String>,
    ) -> Self {
        Self {
            unit: unit.into(),
            check_in: check_in.into(),
            check_out: check_out.into(),
        }
    }

    /// Decodes this request into an insert payload.
    pub fn validate(&self) -> Result<NewBooking, InputError> {
        let (unit, interval) = decode_stay(&self.unit, &self.check_in, &self.check_out)?;
        Ok(NewBooking::new(unit, interval))
    }
}

fn decode_stay(
    unit: &str,
    check_in: &str,
    check_out: &str,
) -> Result<(UnitId, DateInterval), InputError> {
    let unit = UnitId::new(unit).map_err(|_| InputError::MissingField("unit"))?;
    if check_in.trim().is_empty() {
        return Err(InputError::MissingField("checkIn"));
    }
    if check_out.trim().is_empty() {
        return Err(InputError::MissingField("checkOut"));
    }

    let start = parse_calendar_date(check_in).map_err(|source| InputError::InvalidDate {
        field: "checkIn",
        source,
    })?;
    let end = parse_calendar_date(check_out).map_err(|source| InputError::InvalidDate {
        field: "checkOut",
        source,
    })?;

    // both dates passed range checks, only ordering can still fail
    let interval = DateInterval::new(start, end).map_err(|_| InputError::InvalidRange)?;

    Ok((unit, interval))
}

#[cfg(test)]
mod tests {
    use super::{AvailabilityQuery, CreateBookingRequest, InputError};
    use crate::model::date::DateParseError;

    #[test]
    fn blank_fields_are_reported_in_order() {
        let err = AvailabilityQuery::new(" ", "2025-12-25", "2025-12-28")
            .validate()
            .unwrap_err();
        assert_eq!(err, InputError::MissingField("unit"));

        let err = AvailabilityQuery::new("u", "", "2025-12-28")
            .validate()
            .unwrap_err();
        assert_eq!(err, InputError::MissingField("checkIn"));

        let err = AvailabilityQuery::new("u", "2025-12-25", "")
            .validate()
            .unwrap_err();
        assert_eq!(err, InputError::MissingField("checkOut"));
    }

    #[test]
    fn reversed_and_equal_ranges_are_invalid() {
        for (check_in, check_out) in [("2025-12-28", "2025-12-25"), ("2025-12-25", "2025-12-25")] {
            let err = AvailabilityQuery::new("u", check_in, check_out)
                .validate()
                .unwrap_err();
            assert_eq!(err, InputError::InvalidRange);
            assert_eq!(err.to_string(), "check-out must be after check-in");
        }
    }

    #[test]
    fn unparseable_dates_name_the_field() {
        let err = CreateBookingRequest::new("u", "2025-12-25", "tomorrow")
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InputError::InvalidDate {
                field: "checkOut",
                source: DateParseError::Malformed("tomorrow".to_string()),
            }
        );
    }

    #[test]
    fn query_decodes_from_camel_case_json() {
        let query: AvailabilityQuery = serde_json::from_str(
            r#"{ "unit": "2nd-floor", "checkIn": "2025-12-26", "checkOut": "2025-12-27" }"#,
        )
        .unwrap();
        let (unit, interval) = query.validate().unwrap();
        assert_eq!(unit.as_str(), "2nd-floor");
        assert_eq!(interval.nights(), 1);
    }

    #[test]
    fn missing_json_keys_become_missing_fields() {
        let query: AvailabilityQuery = serde_json::from_str(r#"{ "unit": "u" }"#).unwrap();
        assert_eq!(query.validate().unwrap_err(), InputError::MissingField("checkIn"));
    }
}
