//! Booking records.
//!
//! # Responsibility
//! - Define the persisted booking shape and its insert payload.
//!
//! # Invariants
//! - The core reads bookings and never mutates them.
//! - Two bookings for the same unit never overlap once stored.
//!
//! # See also
//! - `repo::booking_repo` for the write-path guard.

use crate::model::interval::DateInterval;
use crate::model::unit::UnitId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier assigned by the booking store.
pub type BookingId = Uuid;

/// One stored booking.
///
/// Serialized as `{ id, unit, checkIn, checkOut, createdAt }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub unit: UnitId,
    #[serde(flatten)]
    pub interval: DateInterval,
    /// Unix epoch milliseconds, assigned on insert.
    pub created_at: i64,
}

impl Booking {
    /// Returns whether this booking blocks `interval` on `unit`.
    pub fn blocks(&self, unit: &UnitId, interval: &DateInterval) -> bool {
        self.unit == *unit && self.interval.overlaps(interval)
    }
}

/// Insert payload; id and timestamp are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub unit: UnitId,
    #[serde(flatten)]
    pub interval: DateInterval,
}

impl NewBooking {
    pub fn new(unit: UnitId, interval: DateInterval) -> Self {
        Self { unit, interval }
    }
}
