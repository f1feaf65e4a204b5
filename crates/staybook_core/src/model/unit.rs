//! Rentable unit identity.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque unit key (e.g. `2nd-floor`, `cottage-1`).
///
/// Only equality matters to the core; unit existence is never checked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitId(String);

/// Rejected unit key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyUnitId;

impl Display for EmptyUnitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unit id cannot be empty")
    }
}

impl Error for EmptyUnitId {}

impl UnitId {
    /// Builds a unit key from trimmed, non-empty text.
    pub fn new(value: impl Into<String>) -> Result<Self, EmptyUnitId> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(EmptyUnitId);
        }
        if trimmed.len() == value.len() {
            return Ok(Self(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for UnitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UnitId {
    type Error = EmptyUnitId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UnitId> for String {
    fn from(value: UnitId) -> Self {
        value.0
    }
}
