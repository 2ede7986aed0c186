//! Test doubles for the appointment store: a mockall mock for
//! expectation-style tests and an in-memory store for behavioral ones.

pub mod repositories;

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use uuid::Uuid;

use crate::models::{DbAppointment, DbBookedSlot, NewAppointment};
use crate::store::{AppointmentFilter, AppointmentStore, InsertOutcome, UpdateOutcome};

/// In-memory [`AppointmentStore`] with the same atomicity contract as the
/// Postgres implementation: `insert_if_free` holds the lock across the
/// conflict check and the insert, so concurrent commits for one slot resolve
/// to exactly one winner.
#[derive(Debug, Default)]
pub struct MemoryAppointmentStore {
    rows: Mutex<Vec<DbAppointment>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DbAppointment>> {
        self.rows.lock().expect("store lock poisoned")
    }
}

#[async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    async fn insert_if_free(&self, new: NewAppointment) -> Result<InsertOutcome> {
        let mut rows = self.lock();

        let held = rows
            .iter()
            .any(|row| row.date == new.date && row.time == new.time && row.status != "cancelled");
        if held {
            return Ok(InsertOutcome::Conflict);
        }

        let now = Utc::now();
        let appointment = DbAppointment {
            id: Uuid::new_v4(),
            name: new.name,
            phone_number: new.phone_number,
            email: new.email,
            date: new.date,
            time: new.time,
            status: "pending".to_string(),
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };
        rows.push(appointment.clone());

        Ok(InsertOutcome::Created(appointment))
    }

    async fn booked_slots(
        &self,
        (start, end): (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<Vec<DbBookedSlot>> {
        let mut slots: Vec<DbBookedSlot> = self
            .lock()
            .iter()
            .filter(|row| row.date >= start && row.date < end && row.status != "cancelled")
            .map(|row| DbBookedSlot {
                time: row.time.clone(),
                status: row.status.clone(),
            })
            .collect();
        slots.sort_by(|a, b| a.time.cmp(&b.time));

        Ok(slots)
    }

    async fn list(&self, filter: AppointmentFilter) -> Result<Vec<DbAppointment>> {
        let mut rows: Vec<DbAppointment> = self
            .lock()
            .iter()
            .filter(|row| match &filter.status {
                Some(status) => row.status == *status,
                None => true,
            })
            .filter(|row| match filter.date_range {
                Some((start, end)) => row.date >= start && row.date < end,
                None => true,
            })
            .cloned()
            .collect();
        rows.sort_by(|a, b| (a.date, &a.time).cmp(&(b.date, &b.time)));

        Ok(rows)
    }

    async fn get(&self, id: Uuid) -> Result<Option<DbAppointment>> {
        Ok(self.lock().iter().find(|row| row.id == id).cloned())
    }

    async fn update(
        &self,
        id: Uuid,
        status: String,
        notes: Option<String>,
    ) -> Result<UpdateOutcome> {
        let mut rows = self.lock();
        let Some(index) = rows.iter().position(|row| row.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };

        // A transition into an active status must not create a second
        // active holder of the slot.
        let (date, time) = (rows[index].date, rows[index].time.clone());
        if status != "cancelled"
            && rows.iter().any(|other| {
                other.id != id
                    && other.date == date
                    && other.time == time
                    && other.status != "cancelled"
            })
        {
            return Ok(UpdateOutcome::Conflict);
        }

        let row = &mut rows[index];
        row.status = status;
        if let Some(notes) = notes {
            row.notes = Some(notes);
        }
        row.updated_at = Utc::now();

        Ok(UpdateOutcome::Updated(row.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let mut rows = self.lock();
        let before = rows.len();
        rows.retain(|row| row.id != id);

        Ok(rows.len() < before)
    }
}
