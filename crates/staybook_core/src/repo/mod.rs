//! Booking persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the booking store contract consumed by services.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Inserts reuse the availability overlap predicate as a write guard.
//! - Repository APIs return semantic errors (`Conflict`, `NotFound`) in
//!   addition to transport errors.

pub mod booking_repo;
