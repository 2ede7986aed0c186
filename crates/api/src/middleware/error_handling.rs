//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the BookSlot
//! API. It maps the domain error taxonomy to HTTP status codes and JSON
//! error responses carrying both a human-readable message and a
//! machine-distinguishable `code`, so clients can react to a taken slot
//! differently from a malformed request.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bookslot_core::errors::BookingError;
use serde_json::json;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps [`BookingError`] instances and implements
/// `IntoResponse` to convert them into HTTP responses.
#[derive(Debug)]
pub struct AppError(pub BookingError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            BookingError::InvalidSlotLabel(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotInPast { .. } => StatusCode::BAD_REQUEST,
            BookingError::Validation(_) => StatusCode::BAD_REQUEST,
            BookingError::SlotAlreadyBooked { .. } => StatusCode::CONFLICT,
            BookingError::NotFound(_) => StatusCode::NOT_FOUND,
            BookingError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.0.to_string(),
            "code": self.0.code(),
        }));

        (status, body).into_response()
    }
}

/// Allows using `?` with functions returning `Result<T, BookingError>` in
/// handlers that return `Result<T, AppError>`.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        AppError(err)
    }
}

/// Store and infrastructure failures surface as `StoreUnavailable`; they are
/// never interpreted as an empty result.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(BookingError::StoreUnavailable(err))
    }
}
