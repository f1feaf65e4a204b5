//! Booking domain model.
//!
//! # Responsibility
//! - Define canonical date, interval, unit and booking types.
//! - Make invalid intervals unrepresentable through smart constructors.
//!
//! # Invariants
//! - Every `DateInterval` is non-empty and half-open.
//! - Dates are parsed and formatted by `model::date` only.

pub mod availability;
pub mod booking;
pub mod date;
pub mod interval;
pub mod unit;
