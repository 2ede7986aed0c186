//! The narrow store interface the booking path depends on.
//!
//! The engine's availability check is a point-in-time snapshot; under
//! concurrent bookings only the store can guarantee exclusivity. That is why
//! [`AppointmentStore::insert_if_free`] exists as a single operation: the
//! "is this slot free" check and the insert must not be observable as two
//! separate steps. The Postgres implementation leans on a partial unique
//! index; the in-memory fake holds a lock across both.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::models::{DbAppointment, DbBookedSlot, NewAppointment};

/// Result of a conditional insert. A `Conflict` means some non-cancelled
/// appointment already held the (date, time) pair at commit time.
#[derive(Debug)]
pub enum InsertOutcome {
    Created(DbAppointment),
    Conflict,
}

/// Result of a status/notes update. A `Conflict` means the change would
/// re-activate an appointment whose (date, time) another non-cancelled row
/// has taken in the meantime.
#[derive(Debug)]
pub enum UpdateOutcome {
    Updated(DbAppointment),
    Conflict,
    NotFound,
}

/// Optional filters for the admin listing.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    pub status: Option<String>,
    /// Half-open UTC range from `clock::day_bounds`.
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Inserts the appointment unless a non-cancelled one already exists for
    /// the same (date, time); the check and insert are one atomic operation.
    async fn insert_if_free(&self, new: NewAppointment) -> Result<InsertOutcome>;

    /// All non-cancelled (time, status) entries whose date falls in the
    /// half-open range. Errors propagate; an error is never "no bookings".
    async fn booked_slots(
        &self,
        range: (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<Vec<DbBookedSlot>>;

    /// Appointments matching the filter, ordered by date then time.
    async fn list(&self, filter: AppointmentFilter) -> Result<Vec<DbAppointment>>;

    async fn get(&self, id: Uuid) -> Result<Option<DbAppointment>>;

    /// Updates status and notes, bumping `updated_at`. Subject to the same
    /// exclusivity contract as the insert: a transition out of `cancelled`
    /// must not create a second active holder of the slot.
    async fn update(
        &self,
        id: Uuid,
        status: String,
        notes: Option<String>,
    ) -> Result<UpdateOutcome>;

    /// Administrative hard delete. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
