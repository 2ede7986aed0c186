use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::{DbAppointment, DbBookedSlot, NewAppointment};
use crate::store::{AppointmentFilter, AppointmentStore, InsertOutcome, UpdateOutcome};

/// Postgres-backed appointment store.
///
/// Slot exclusivity rests on the partial unique index over `(date, time)
/// WHERE status <> 'cancelled'` created by `schema::initialize_database`:
/// two concurrent inserts for the same slot race inside Postgres and exactly
/// one wins, the other surfacing here as a unique violation mapped to
/// [`InsertOutcome::Conflict`].
#[derive(Debug, Clone)]
pub struct PgAppointmentStore {
    pool: Pool<Postgres>,
}

impl PgAppointmentStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AppointmentStore for PgAppointmentStore {
    async fn insert_if_free(&self, new: NewAppointment) -> Result<InsertOutcome> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        tracing::debug!(
            "Inserting appointment: id={}, date={}, time={}",
            id,
            new.date,
            new.time
        );

        let inserted = sqlx::query_as::<_, DbAppointment>(
            r#"
            INSERT INTO appointments
                (id, name, phone_number, email, date, time, status, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8, $8)
            RETURNING id, name, phone_number, email, date, time, status, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&new.name)
        .bind(&new.phone_number)
        .bind(&new.email)
        .bind(new.date)
        .bind(&new.time)
        .bind(&new.notes)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        match inserted {
            Ok(appointment) => Ok(InsertOutcome::Created(appointment)),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!(
                    "Slot conflict on insert: date={}, time={}",
                    new.date,
                    new.time
                );
                Ok(InsertOutcome::Conflict)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn booked_slots(
        &self,
        (start, end): (DateTime<Utc>, DateTime<Utc>),
    ) -> Result<Vec<DbBookedSlot>> {
        let slots = sqlx::query_as::<_, DbBookedSlot>(
            r#"
            SELECT time, status
            FROM appointments
            WHERE date >= $1 AND date < $2 AND status <> 'cancelled'
            ORDER BY time ASC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(slots)
    }

    async fn list(&self, filter: AppointmentFilter) -> Result<Vec<DbAppointment>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT id, name, phone_number, email, date, time, status, notes, created_at, updated_at
            FROM appointments
            WHERE 1 = 1
            "#,
        );

        if let Some(status) = &filter.status {
            query.push(" AND status = ").push_bind(status.clone());
        }
        if let Some((start, end)) = filter.date_range {
            query.push(" AND date >= ").push_bind(start);
            query.push(" AND date < ").push_bind(end);
        }
        query.push(" ORDER BY date ASC, time ASC");

        let appointments = query
            .build_query_as::<DbAppointment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(appointments)
    }

    async fn get(&self, id: Uuid) -> Result<Option<DbAppointment>> {
        let appointment = sqlx::query_as::<_, DbAppointment>(
            r#"
            SELECT id, name, phone_number, email, date, time, status, notes, created_at, updated_at
            FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(appointment)
    }

    async fn update(
        &self,
        id: Uuid,
        status: String,
        notes: Option<String>,
    ) -> Result<UpdateOutcome> {
        tracing::debug!("Updating appointment: id={}, status={}", id, status);

        let updated = sqlx::query_as::<_, DbAppointment>(
            r#"
            UPDATE appointments
            SET status = $2, notes = COALESCE($3, notes), updated_at = $4
            WHERE id = $1
            RETURNING id, name, phone_number, email, date, time, status, notes, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&status)
        .bind(notes)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await;

        match updated {
            Ok(Some(appointment)) => Ok(UpdateOutcome::Updated(appointment)),
            Ok(None) => Ok(UpdateOutcome::NotFound),
            // Re-activating a row trips the partial unique index when its
            // slot has been re-booked since.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                tracing::debug!("Slot conflict on update: id={}, status={}", id, status);
                Ok(UpdateOutcome::Conflict)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM appointments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
