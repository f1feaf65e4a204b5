//! Booking and availability use cases.
//!
//! # Responsibility
//! - Validate raw requests before the availability engine runs.
//! - Gate booking management behind an admin `RequestContext`.
//! - Translate store errors into use-case errors.
//!
//! # Invariants
//! - `check_availability` never writes.
//! - `create_booking` never bypasses the repository overlap guard.
//! - Logged events carry unit keys and counts only, never raw payloads.

use crate::availability;
use crate::config::{AvailabilityConfig, ConfigError};
use crate::model::availability::AvailabilityResult;
use crate::model::booking::{Booking, BookingId, NewBooking};
use crate::model::interval::DateInterval;
use crate::model::unit::UnitId;
use crate::repo::booking_repo::{BookingRepository, RepoError};
use crate::request::{AvailabilityQuery, CreateBookingRequest, InputError};
use crate::service::context::RequestContext;
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Sample stays inserted by `seed_sample_bookings` into an empty store.
const SAMPLE_BOOKINGS: &[(&str, &str, &str)] = &[
    ("2nd-floor", "2025-12-25", "2025-12-28"),
    ("2nd-floor", "2025-12-29", "2026-01-01"),
    ("ground-floor", "2025-10-03", "2026-01-08"),
    ("cottage-1", "2025-10-03", "2026-01-08"),
];

/// Use-case error for booking flows.
#[derive(Debug)]
pub enum BookingServiceError {
    /// Client input rejected before reaching the engine.
    InvalidInput(InputError),
    /// Caller is not allowed to run this use case.
    Forbidden,
    /// Insert would double-book the unit.
    Conflict {
        unit: UnitId,
        conflicts: Vec<Booking>,
    },
    NotFound(BookingId),
    Repo(RepoError),
}

impl Display for BookingServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "{err}"),
            Self::Forbidden => write!(f, "admin access required"),
            Self::Conflict { .. } => write!(f, "dates overlap existing booking"),
            Self::NotFound(id) => write!(f, "booking not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BookingServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<InputError> for BookingServiceError {
    fn from(value: InputError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for BookingServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Conflict { unit, conflicts } => Self::Conflict { unit, conflicts },
            other => Self::Repo(other),
        }
    }
}

pub type ServiceResult<T> = Result<T, BookingServiceError>;

/// Booking service facade over a repository implementation.
pub struct BookingService<R: BookingRepository> {
    repo: R,
    config: AvailabilityConfig,
}

impl<R: BookingRepository> BookingService<R> {
    /// Creates a service with the default suggestion policy.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            config: AvailabilityConfig::default(),
        }
    }

    /// Creates a service with a custom suggestion policy.
    pub fn with_config(repo: R, config: AvailabilityConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { repo, config })
    }

    pub fn config(&self) -> &AvailabilityConfig {
        &self.config
    }

    /// Answers one availability query. Open to any caller.
    pub fn check_availability(
        &self,
        query: &AvailabilityQuery,
    ) -> ServiceResult<AvailabilityResult> {
        let (unit, requested) = query.validate()?;
        self.check_interval(&unit, &requested)
    }

    /// Same as [`Self::check_availability`] for already-decoded input.
    pub fn check_interval(
        &self,
        unit: &UnitId,
        requested: &DateInterval,
    ) -> ServiceResult<AvailabilityResult> {
        let bookings = self.repo.list_bookings_for_unit(unit)?;
        let result = availability::check_availability(unit, &bookings, requested, &self.config);

        debug!(
            "event=availability_check module=service status=ok unit={} nights={} scanned={} available={} conflicts={} suggestions={}",
            unit,
            requested.nights(),
            bookings.len(),
            result.available,
            result.conflicts.len(),
            result.suggestions.len()
        );
        Ok(result)
    }

    /// Stores a new booking. Admin only.
    pub fn create_booking(
        &mut self,
        ctx: &RequestContext,
        request: &CreateBookingRequest,
    ) -> ServiceResult<Booking> {
        require_admin(ctx)?;
        let booking = request.validate()?;
        self.insert(&booking)
    }

    /// Lists every stored booking. Admin only.
    pub fn list_bookings(&self, ctx: &RequestContext) -> ServiceResult<Vec<Booking>> {
        require_admin(ctx)?;
        Ok(self.repo.list_bookings()?)
    }

    /// Deletes one booking by id. Admin only.
    pub fn delete_booking(&mut self, ctx: &RequestContext, id: BookingId) -> ServiceResult<()> {
        require_admin(ctx)?;
        self.repo.delete_booking(id)?;
        info!("event=booking_delete module=service status=ok booking_id={id}");
        Ok(())
    }

    /// Inserts the sample stays when the store is empty. Admin only.
    ///
    /// All samples land in one transaction. Returns the number inserted
    /// (0 when data already exists).
    pub fn seed_sample_bookings(&mut self, ctx: &RequestContext) -> ServiceResult<usize> {
        require_admin(ctx)?;
        if !self.repo.list_bookings()?.is_empty() {
            info!("event=booking_seed module=service status=skipped reason=store_not_empty");
            return Ok(0);
        }

        let samples = SAMPLE_BOOKINGS
            .iter()
            .map(|(unit, check_in, check_out)| {
                CreateBookingRequest::new(*unit, *check_in, *check_out).validate()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let inserted = self.repo.insert_bookings(&samples)?.len();
        info!("event=booking_seed module=service status=ok inserted={inserted}");
        Ok(inserted)
    }

    fn insert(&mut self, booking: &NewBooking) -> ServiceResult<Booking> {
        match self.repo.insert_booking(booking) {
            Ok(stored) => {
                info!(
                    "event=booking_insert module=service status=ok unit={} booking_id={} nights={}",
                    stored.unit,
                    stored.id,
                    stored.interval.nights()
                );
                Ok(stored)
            }
            Err(RepoError::Conflict { unit, conflicts }) => {
                warn!(
                    "event=booking_conflict module=service status=rejected unit={} conflicts={}",
                    unit,
                    conflicts.len()
                );
                Err(BookingServiceError::Conflict { unit, conflicts })
            }
            Err(err) => Err(err.into()),
        }
    }
}

fn require_admin(ctx: &RequestContext) -> ServiceResult<()> {
    if ctx.is_admin() {
        Ok(())
    } else {
        Err(BookingServiceError::Forbidden)
    }
}
