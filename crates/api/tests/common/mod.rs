use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bookslot_api::config::ApiConfig;
use bookslot_api::notify::{EmailMessage, Notifier};
use bookslot_api::ApiState;
use bookslot_core::models::appointment::CreateAppointmentRequest;
use bookslot_core::schedule::clock::FixedClock;
use bookslot_db::mock::MemoryAppointmentStore;
use bookslot_db::store::AppointmentStore;
use chrono::NaiveDate;
use eyre::Result;

/// Notifier that captures rendered emails for assertions.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("notifier lock poisoned").clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: EmailMessage) -> Result<()> {
        self.sent.lock().expect("notifier lock poisoned").push(message);
        Ok(())
    }
}

/// Handler test fixture: in-memory store, pinned clock, recording notifier.
pub struct TestContext {
    pub state: Arc<ApiState>,
    pub store: Arc<MemoryAppointmentStore>,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestContext {
    /// Pins "now" to the given business-local wall-clock time.
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
        let store = Arc::new(MemoryAppointmentStore::new());
        let notifier = Arc::new(RecordingNotifier::default());
        let state = Arc::new(ApiState {
            store: store.clone(),
            clock: Arc::new(FixedClock::at_local(date, hour, minute)),
            notifier: notifier.clone(),
            config: ApiConfig::default(),
        });

        Self {
            state,
            store,
            notifier,
        }
    }

    /// Fixture over an arbitrary store (e.g. a mockall mock).
    pub fn with_store(
        store: Arc<dyn AppointmentStore>,
        date: NaiveDate,
        hour: u32,
        minute: u32,
    ) -> Self {
        let notifier = Arc::new(RecordingNotifier::default());
        let state = Arc::new(ApiState {
            store,
            clock: Arc::new(FixedClock::at_local(date, hour, minute)),
            notifier: notifier.clone(),
            config: ApiConfig::default(),
        });

        Self {
            state,
            store: Arc::new(MemoryAppointmentStore::new()),
            notifier,
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn booking_request(d: NaiveDate, time: &str) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        name: "Dana Smith".to_string(),
        phone_number: "5551234567".to_string(),
        email: "dana@example.com".to_string(),
        date: d,
        time: time.to_string(),
        notes: None,
    }
}
