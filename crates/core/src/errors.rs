use chrono::NaiveDate;
use thiserror::Error;

use crate::schedule::slots::SlotLabel;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Unrecognized time slot: {0:?}")]
    InvalidSlotLabel(String),

    #[error("Time slot {slot} on {date} has already passed")]
    SlotInPast { date: NaiveDate, slot: SlotLabel },

    #[error("Time slot {slot} on {date} is already booked")]
    SlotAlreadyBooked { date: NaiveDate, slot: SlotLabel },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Appointment store unavailable: {0}")]
    StoreUnavailable(#[from] eyre::Report),
}

impl BookingError {
    /// Machine-readable reason code carried in API error bodies, so clients
    /// can distinguish a taken slot from a malformed request without string
    /// matching.
    pub fn code(&self) -> &'static str {
        match self {
            BookingError::InvalidSlotLabel(_) => "invalid_slot_label",
            BookingError::SlotInPast { .. } => "slot_in_past",
            BookingError::SlotAlreadyBooked { .. } => "slot_taken",
            BookingError::NotFound(_) => "not_found",
            BookingError::Validation(_) => "validation",
            BookingError::StoreUnavailable(_) => "store_unavailable",
        }
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
