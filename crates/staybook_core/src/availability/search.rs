//! Conflict scan and forward suggestion search.
//!
//! # Invariants
//! - `conflicts` keeps the input order of the booking slice.
//! - At most `search_horizon_days * bookings.len()` overlap checks per query.
//! - The first conflict-free candidate wins; later openings are not reported.

use crate::config::AvailabilityConfig;
use crate::model::availability::AvailabilityResult;
use crate::model::booking::Booking;
use crate::model::interval::DateInterval;
use crate::model::unit::UnitId;
use chrono::Days;

/// Returns the bookings of `unit` that overlap `requested`, in input order.
///
/// `bookings` may hold other units; those are skipped.
pub fn find_conflicts(
    unit: &UnitId,
    bookings: &[Booking],
    requested: &DateInterval,
) -> Vec<Booking> {
    bookings
        .iter()
        .filter(|booking| booking.blocks(unit, requested))
        .cloned()
        .collect()
}

/// Searches forward from `requested.end()` for the first free window.
///
/// Candidate `i` starts `i` days after the requested check-out and spans
/// `config.suggestion_nights(requested.nights())` nights. Returns `None`
/// when every candidate inside the horizon collides with a booking, or
/// when the next candidate would leave the supported calendar range.
pub fn suggest_next_window(
    unit: &UnitId,
    bookings: &[Booking],
    requested: &DateInterval,
    config: &AvailabilityConfig,
) -> Option<DateInterval> {
    let nights = config.suggestion_nights(requested.nights());
    let unit_bookings: Vec<&Booking> = bookings.iter().filter(|b| b.unit == *unit).collect();

    for offset in 0..config.search_horizon_days {
        let start = requested.end().checked_add_days(Days::new(u64::from(offset)))?;
        let candidate = DateInterval::starting_at(start, nights)?;
        let clash = unit_bookings
            .iter()
            .any(|booking| booking.interval.overlaps(&candidate));
        if !clash {
            return Some(candidate);
        }
    }

    None
}

/// Classifies `requested` against the bookings of `unit`.
///
/// Scan -> classify -> suggest. `suggestions` is empty whenever the unit is
/// available, and holds at most one window otherwise.
pub fn check_availability(
    unit: &UnitId,
    bookings: &[Booking],
    requested: &DateInterval,
    config: &AvailabilityConfig,
) -> AvailabilityResult {
    let conflicts = find_conflicts(unit, bookings, requested);
    if conflicts.is_empty() {
        return AvailabilityResult::free();
    }

    let suggestions = suggest_next_window(unit, bookings, requested, config)
        .into_iter()
        .collect();

    AvailabilityResult {
        available: false,
        conflicts,
        suggestions,
    }
}
