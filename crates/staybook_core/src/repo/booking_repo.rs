//! Booking repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Store, list and delete bookings.
//! - Reject inserts that would double-book a unit.
//!
//! # Invariants
//! - Read-check-insert runs inside one `IMMEDIATE` transaction, so two
//!   writers racing on the same database are serialized and the second one
//!   observes the first one's booking.
//! - The `bookings_no_overlap` trigger backs the application check; its
//!   failure is reported as `Conflict`, never as a transport error.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::availability::find_conflicts;
use crate::db::migrations::OVERLAP_TRIGGER_MESSAGE;
use crate::db::DbError;
use crate::model::booking::{Booking, BookingId, NewBooking};
use crate::model::date::format_calendar_date;
use crate::model::interval::DateInterval;
use crate::model::unit::UnitId;
use chrono::Utc;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const BOOKING_SELECT_SQL: &str = "SELECT
    id,
    unit,
    check_in,
    check_out,
    created_at
FROM bookings";

const BOOKING_ORDER_SQL: &str = "ORDER BY check_in ASC, created_at ASC, id ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Booking store error.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(BookingId),
    InvalidData(String),
    /// The insert would overlap existing bookings of the same unit.
    Conflict {
        unit: UnitId,
        conflicts: Vec<Booking>,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "booking not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted booking data: {message}"),
            Self::Conflict { unit, conflicts } => write!(
                f,
                "dates overlap existing booking for unit `{unit}` ({} conflict(s))",
                conflicts.len()
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Booking store contract.
pub trait BookingRepository {
    /// Inserts `booking` unless it overlaps a booking of the same unit.
    fn insert_booking(&mut self, booking: &NewBooking) -> RepoResult<Booking>;
    /// Inserts every booking in one transaction, or none of them.
    fn insert_bookings(&mut self, bookings: &[NewBooking]) -> RepoResult<Vec<Booking>>;
    fn get_booking(&self, id: BookingId) -> RepoResult<Option<Booking>>;
    /// All bookings, ordered by check-in.
    fn list_bookings(&self) -> RepoResult<Vec<Booking>>;
    /// Bookings of one unit, ordered by check-in.
    fn list_bookings_for_unit(&self, unit: &UnitId) -> RepoResult<Vec<Booking>>;
    fn delete_booking(&mut self, id: BookingId) -> RepoResult<()>;
}

/// SQLite-backed booking store.
pub struct SqliteBookingRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteBookingRepository<'conn> {
    /// Wraps a connection returned by `open_db`/`open_db_in_memory`.
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl BookingRepository for SqliteBookingRepository<'_> {
    fn insert_booking(&mut self, booking: &NewBooking) -> RepoResult<Booking> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let stored = insert_checked(&tx, booking)?;
        tx.commit()?;
        Ok(stored)
    }

    fn insert_bookings(&mut self, bookings: &[NewBooking]) -> RepoResult<Vec<Booking>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut stored = Vec::with_capacity(bookings.len());
        for booking in bookings {
            stored.push(insert_checked(&tx, booking)?);
        }
        tx.commit()?;
        Ok(stored)
    }

    fn get_booking(&self, id: BookingId) -> RepoResult<Option<Booking>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKING_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_booking_row(row)?));
        }
        Ok(None)
    }

    fn list_bookings(&self) -> RepoResult<Vec<Booking>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOKING_SELECT_SQL} {BOOKING_ORDER_SQL};"))?;
        let mut rows = stmt.query([])?;
        let mut bookings = Vec::new();
        while let Some(row) = rows.next()? {
            bookings.push(parse_booking_row(row)?);
        }
        Ok(bookings)
    }

    fn list_bookings_for_unit(&self, unit: &UnitId) -> RepoResult<Vec<Booking>> {
        select_unit_bookings(self.conn, unit)
    }

    fn delete_booking(&mut self, id: BookingId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM bookings WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

/// Read-check-insert for one booking; the caller owns commit or rollback.
fn insert_checked(tx: &Transaction<'_>, booking: &NewBooking) -> RepoResult<Booking> {
    let existing = select_unit_bookings(tx, &booking.unit)?;
    let conflicts = find_conflicts(&booking.unit, &existing, &booking.interval);
    if !conflicts.is_empty() {
        return Err(RepoError::Conflict {
            unit: booking.unit.clone(),
            conflicts,
        });
    }

    let stored = Booking {
        id: Uuid::new_v4(),
        unit: booking.unit.clone(),
        interval: booking.interval,
        created_at: Utc::now().timestamp_millis(),
    };
    let inserted = tx.execute(
        "INSERT INTO bookings (id, unit, check_in, check_out, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            stored.id.to_string(),
            stored.unit.as_str(),
            format_calendar_date(stored.interval.start()),
            format_calendar_date(stored.interval.end()),
            stored.created_at,
        ],
    );
    match inserted {
        Ok(_) => Ok(stored),
        Err(err) if is_overlap_violation(&err) => {
            let existing = select_unit_bookings(tx, &booking.unit)?;
            Err(RepoError::Conflict {
                unit: booking.unit.clone(),
                conflicts: find_conflicts(&booking.unit, &existing, &booking.interval),
            })
        }
        Err(err) => Err(err.into()),
    }
}

fn select_unit_bookings(conn: &Connection, unit: &UnitId) -> RepoResult<Vec<Booking>> {
    let mut stmt = conn.prepare(&format!(
        "{BOOKING_SELECT_SQL} WHERE unit = ?1 {BOOKING_ORDER_SQL};"
    ))?;
    let mut rows = stmt.query([unit.as_str()])?;
    let mut bookings = Vec::new();
    while let Some(row) = rows.next()? {
        bookings.push(parse_booking_row(row)?);
    }
    Ok(bookings)
}

fn parse_booking_row(row: &Row<'_>) -> RepoResult<Booking> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in bookings.id"))
    })?;

    let unit_text: String = row.get("unit")?;
    let unit = UnitId::new(unit_text)
        .map_err(|err| RepoError::InvalidData(format!("bookings.unit for {id}: {err}")))?;

    let check_in: String = row.get("check_in")?;
    let check_out: String = row.get("check_out")?;
    let interval = DateInterval::parse(&check_in, &check_out).map_err(|err| {
        RepoError::InvalidData(format!("bookings interval for {id}: {err}"))
    })?;

    Ok(Booking {
        id,
        unit,
        interval,
        created_at: row.get("created_at")?,
    })
}

fn is_overlap_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(_, Some(message)) if message.contains(OVERLAP_TRIGGER_MESSAGE)
    )
}

#[cfg(test)]
mod tests {
    use super::is_overlap_violation;
    use crate::db::open_db_in_memory;
    use rusqlite::Connection;

    fn raw_insert(
        conn: &Connection,
        id: &str,
        unit: &str,
        check_in: &str,
        check_out: &str,
    ) -> rusqlite::Result<usize> {
        conn.execute(
            "INSERT INTO bookings (id, unit, check_in, check_out) VALUES (?1, ?2, ?3, ?4);",
            [id, unit, check_in, check_out],
        )
    }

    #[test]
    fn trigger_abort_is_recognized_as_overlap() {
        let conn = open_db_in_memory().unwrap();
        raw_insert(
            &conn,
            "00000000-0000-4000-8000-000000000001",
            "2nd-floor",
            "2025-12-25",
            "2025-12-28",
        )
        .unwrap();

        let err = raw_insert(
            &conn,
            "00000000-0000-4000-8000-000000000002",
            "2nd-floor",
            "2025-12-27",
            "2025-12-30",
        )
        .unwrap_err();
        assert!(is_overlap_violation(&err));
    }

    #[test]
    fn other_constraint_failures_are_not_overlaps() {
        let conn = open_db_in_memory().unwrap();
        let err = raw_insert(
            &conn,
            "00000000-0000-4000-8000-000000000003",
            "2nd-floor",
            "2025-12-28",
            "2025-12-25",
        )
        .unwrap_err();
        assert!(!is_overlap_violation(&err));
    }
}
