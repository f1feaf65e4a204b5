//! Date-range availability engine.
//!
//! # Responsibility
//! - Decide whether a unit is free for a requested stay.
//! - Propose the next open window when it is not.
//!
//! # Invariants
//! - Pure over the supplied booking slice: no I/O, no locks, no mutation.
//! - Callers pass only validated `DateInterval` values.

pub mod search;

pub use crate::model::interval::overlaps;
pub use search::{check_availability, find_conflicts, suggest_next_window};
