//! Availability answer returned to callers.

use crate::model::booking::Booking;
use crate::model::interval::DateInterval;
use serde::{Deserialize, Serialize};

/// Result of one availability query. Built per call, never persisted.
///
/// `available == false` with empty `suggestions` is a valid outcome: no
/// opening was found inside the search horizon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub available: bool,
    /// Overlapping bookings in store order.
    pub conflicts: Vec<Booking>,
    /// At most one replacement window; empty when `available`.
    pub suggestions: Vec<DateInterval>,
}

impl AvailabilityResult {
    pub fn free() -> Self {
        Self {
            available: true,
            conflicts: Vec::new(),
            suggestions: Vec::new(),
        }
    }
}
