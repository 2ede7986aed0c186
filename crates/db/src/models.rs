use bookslot_core::errors::BookingError;
use bookslot_core::models::Appointment;
use bookslot_core::schedule::clock;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored appointment row. `date` is the UTC instant of the business-local
/// start of day (the left edge of `clock::day_bounds`); `time` and `status`
/// are stored as their label/wire strings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The (time, status) projection used by the availability query.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBookedSlot {
    pub time: String,
    pub status: String,
}

/// Input to the conditional insert. Field validation and slot checks happen
/// in the API layer before one of these is built.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub date: DateTime<Utc>,
    pub time: String,
    pub notes: Option<String>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = BookingError;

    /// Converts a stored row back into domain types. The stored instant is
    /// mapped to its business-local civil date through the clock adapter, so
    /// a row never drifts into the adjacent day.
    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            name: row.name,
            phone_number: row.phone_number,
            email: row.email,
            date: clock::local_date(row.date),
            time: row.time.parse()?,
            status: row.status.parse()?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
