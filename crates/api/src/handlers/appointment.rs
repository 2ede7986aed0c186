//! # Appointment Handlers
//!
//! Booking (customer-facing) and review (admin-facing) endpoints.
//!
//! The booking path re-validates the requested slot against a freshly
//! queried booked set before writing: the availability list the customer
//! picked from may be stale by the time they submit. Even that re-check is
//! only best effort under concurrency; the store's conditional insert is
//! the final authority, and its conflict outcome maps to the same
//! `SlotAlreadyBooked` error.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use bookslot_core::errors::BookingError;
use bookslot_core::models::appointment::{
    Appointment, CreateAppointmentRequest, CreateAppointmentResponse, ListAppointmentsResponse,
    UpdateAppointmentRequest,
};
use bookslot_core::schedule::availability::{check_bookable, check_within_horizon};
use bookslot_core::schedule::clock::day_bounds;
use bookslot_core::schedule::slots::SlotLabel;
use bookslot_db::models::NewAppointment;
use bookslot_db::store::{AppointmentFilter, InsertOutcome, UpdateOutcome};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::handlers::availability::parse_booked_entries;
use crate::middleware::error_handling::AppError;
use crate::{notify, ApiState};

/// Books a new appointment.
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// Returns 201 with the created appointment, 400 for validation failures and
/// passed slots, or 409 when the slot was taken first.
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<CreateAppointmentResponse>), AppError> {
    validate_contact_fields(&payload)?;

    let slot: SlotLabel = payload.time.parse()?;
    check_within_horizon(state.clock.as_ref(), payload.date)?;

    // Re-validate against a fresh booked set; the list shown to the customer
    // may be stale.
    let range = day_bounds(payload.date);
    let booked = state.store.booked_slots(range).await?;
    check_bookable(
        state.clock.as_ref(),
        payload.date,
        slot,
        &parse_booked_entries(&booked),
    )?;

    let outcome = state
        .store
        .insert_if_free(NewAppointment {
            name: payload.name.trim().to_string(),
            phone_number: payload.phone_number.trim().to_string(),
            email: payload.email.trim().to_lowercase(),
            date: range.0,
            time: slot.to_string(),
            notes: payload.notes.clone(),
        })
        .await?;

    let row = match outcome {
        InsertOutcome::Created(row) => row,
        InsertOutcome::Conflict => {
            return Err(AppError(BookingError::SlotAlreadyBooked {
                date: payload.date,
                slot,
            }))
        }
    };
    let appointment = Appointment::try_from(row)?;

    tracing::info!(
        id = %appointment.id,
        date = %appointment.date,
        time = %appointment.time,
        "Appointment booked"
    );

    // Notification failures are logged, never surfaced as a booking failure.
    send_booking_notifications(&state, &appointment).await;

    Ok((
        StatusCode::CREATED,
        Json(CreateAppointmentResponse {
            message: "Appointment booked successfully!".to_string(),
            appointment,
        }),
    ))
}

/// Query parameters for the admin listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    /// Restrict to one civil date in the business timezone.
    pub date: Option<NaiveDate>,
}

/// Lists appointments, optionally filtered by status and date, ordered by
/// date then time.
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments?status=pending&date=2025-06-13
/// ```
#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListAppointmentsResponse>, AppError> {
    // Reject unknown status values instead of silently matching nothing.
    let status = query
        .status
        .map(|s| {
            s.parse::<bookslot_core::models::BookingStatus>()
                .map(|status| status.as_str().to_string())
        })
        .transpose()?;

    let rows = state
        .store
        .list(AppointmentFilter {
            status,
            date_range: query.date.map(day_bounds),
        })
        .await?;

    let appointments = rows
        .into_iter()
        .map(Appointment::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListAppointmentsResponse { appointments }))
}

/// Fetches a single appointment by id.
#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let row = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;

    Ok(Json(Appointment::try_from(row)?))
}

/// Updates an appointment's status and notes; sends the customer a
/// status-update email when the status actually changed.
///
/// Returns 409 when the change would re-activate a cancelled appointment
/// whose slot has been booked by someone else in the meantime.
///
/// # Endpoint
///
/// ```text
/// PATCH /api/appointments/:id
/// ```
#[axum::debug_handler]
pub async fn update_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let original = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {id} not found")))?;
    let original = Appointment::try_from(original)?;
    let status_changed = original.status != payload.status;

    let outcome = state
        .store
        .update(id, payload.status.as_str().to_string(), payload.notes.clone())
        .await?;
    let row = match outcome {
        UpdateOutcome::Updated(row) => row,
        UpdateOutcome::Conflict => {
            return Err(AppError(BookingError::SlotAlreadyBooked {
                date: original.date,
                slot: original.time,
            }))
        }
        UpdateOutcome::NotFound => {
            return Err(AppError(BookingError::NotFound(format!(
                "Appointment with ID {id} not found"
            ))))
        }
    };
    let appointment = Appointment::try_from(row)?;

    if status_changed {
        let message = notify::status_update(&state.config.business_name, &appointment);
        if let Err(err) = state.notifier.send(message).await {
            tracing::error!(id = %appointment.id, "Status update email failed: {err:#}");
        }
    }

    Ok(Json(appointment))
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}

/// Administrative hard delete.
#[axum::debug_handler]
pub async fn delete_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteResponse>, AppError> {
    let deleted = state.store.delete(id).await?;
    if !deleted {
        return Err(AppError(BookingError::NotFound(format!(
            "Appointment with ID {id} not found"
        ))));
    }

    Ok(Json(DeleteResponse {
        message: "Appointment deleted successfully".to_string(),
    }))
}

/// Field rules carried over from the original booking form: name 2-50
/// characters, phone 10-15 digits, plausible email.
fn validate_contact_fields(payload: &CreateAppointmentRequest) -> Result<(), AppError> {
    let name = payload.name.trim();
    if name.chars().count() < 2 || name.chars().count() > 50 {
        return Err(AppError(BookingError::Validation(
            "Name must be between 2 and 50 characters".to_string(),
        )));
    }

    let digits = payload.phone_number.chars().filter(char::is_ascii_digit).count();
    if !(10..=15).contains(&digits) {
        return Err(AppError(BookingError::Validation(
            "Phone number must contain between 10 and 15 digits".to_string(),
        )));
    }

    let email = payload.email.trim();
    let valid_email = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
    });
    if !valid_email {
        return Err(AppError(BookingError::Validation(
            "Please enter a valid email address".to_string(),
        )));
    }

    Ok(())
}

async fn send_booking_notifications(state: &ApiState, appointment: &Appointment) {
    let business = &state.config.business_name;

    let confirmation = notify::customer_confirmation(business, appointment);
    if let Err(err) = state.notifier.send(confirmation).await {
        tracing::error!(id = %appointment.id, "Customer confirmation email failed: {err:#}");
    }

    if let Some(admin) = &state.config.admin_email {
        let heads_up = notify::admin_notification(business, admin, appointment);
        if let Err(err) = state.notifier.send(heads_up).await {
            tracing::error!(id = %appointment.id, "Admin notification email failed: {err:#}");
        }
    }
}
