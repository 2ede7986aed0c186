//! # Availability Handler
//!
//! The listing path of the scheduling engine: given a civil date, return the
//! ordered slots a customer may still book. The handler is deliberately
//! thin: it queries the booked entries for the day and delegates every
//! decision to `bookslot_core::schedule::availability`, which also serves
//! the booking write path. Nothing here is cached: the result depends on
//! "now" and on the current booked set, so it is recomputed per request.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use bookslot_core::models::appointment::AvailableSlotsResponse;
use bookslot_core::models::BookingStatus;
use bookslot_core::schedule::availability::available_slots;
use bookslot_core::schedule::clock::day_bounds;
use bookslot_core::schedule::slots::SlotLabel;
use bookslot_db::models::DbBookedSlot;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{middleware::error_handling::AppError, ApiState};

/// Query parameters for the availability endpoint.
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// Civil date in the business timezone, `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// Returns the bookable slots for a date.
///
/// # Endpoint
///
/// ```text
/// GET /api/availability?date=2025-06-13
/// ```
///
/// A store failure propagates as an error response; it is never reported as
/// a day with zero bookings.
#[axum::debug_handler]
pub async fn get_available_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<AvailableSlotsResponse>, AppError> {
    let booked = state.store.booked_slots(day_bounds(query.date)).await?;
    let entries = parse_booked_entries(&booked);

    let slots = available_slots(state.clock.as_ref(), query.date, &entries);

    Ok(Json(AvailableSlotsResponse {
        date: query.date,
        slots,
    }))
}

/// Maps stored rows to engine input. A row that fails to parse was not
/// written by this service; it is logged and dropped.
pub(crate) fn parse_booked_entries(rows: &[DbBookedSlot]) -> Vec<(SlotLabel, BookingStatus)> {
    rows.iter()
        .filter_map(|row| {
            match (row.time.parse::<SlotLabel>(), row.status.parse::<BookingStatus>()) {
                (Ok(slot), Ok(status)) => Some((slot, status)),
                _ => {
                    tracing::warn!(
                        time = %row.time,
                        status = %row.status,
                        "Skipping stored slot entry that does not parse"
                    );
                    None
                }
            }
        })
        .collect()
}
