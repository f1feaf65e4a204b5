//! Booking availability core for staybook.
//! This crate owns the date-range overlap rules and the booking store guard.

pub mod availability;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod request;
pub mod service;

pub use availability::{check_availability, find_conflicts, overlaps, suggest_next_window};
pub use config::{AvailabilityConfig, ConfigError, SuggestionLength};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::availability::AvailabilityResult;
pub use model::booking::{Booking, BookingId, NewBooking};
pub use model::date::{format_calendar_date, parse_calendar_date, CalendarDate, DateParseError};
pub use model::interval::{DateInterval, IntervalError};
pub use model::unit::{EmptyUnitId, UnitId};
pub use repo::booking_repo::{BookingRepository, RepoError, RepoResult, SqliteBookingRepository};
pub use request::{AvailabilityQuery, CreateBookingRequest, InputError};
pub use service::booking_service::{BookingService, BookingServiceError, ServiceResult};
pub use service::context::RequestContext;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
