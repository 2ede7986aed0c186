use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbAppointment, DbBookedSlot, NewAppointment};
use crate::store::{AppointmentFilter, AppointmentStore, InsertOutcome, UpdateOutcome};

// Mock store for expectation-style tests (e.g. forcing query failures).
mock! {
    pub AppointmentRepo {}

    #[async_trait]
    impl AppointmentStore for AppointmentRepo {
        async fn insert_if_free(&self, new: NewAppointment) -> eyre::Result<InsertOutcome>;

        async fn booked_slots(
            &self,
            range: (DateTime<Utc>, DateTime<Utc>),
        ) -> eyre::Result<Vec<DbBookedSlot>>;

        async fn list(&self, filter: AppointmentFilter) -> eyre::Result<Vec<DbAppointment>>;

        async fn get(&self, id: Uuid) -> eyre::Result<Option<DbAppointment>>;

        async fn update(
            &self,
            id: Uuid,
            status: String,
            notes: Option<String>,
        ) -> eyre::Result<UpdateOutcome>;

        async fn delete(&self, id: Uuid) -> eyre::Result<bool>;
    }
}
