use axum::http::StatusCode;
use axum::response::IntoResponse;
use bookslot_api::middleware::error_handling::AppError;
use bookslot_core::errors::BookingError;
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

fn sample_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 12).unwrap()
}

async fn response_parts(err: BookingError) -> (StatusCode, Value) {
    let response = AppError(err).into_response();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let body: Value = serde_json::from_slice(&bytes).expect("body should be JSON");
    (status, body)
}

#[rstest]
#[case(BookingError::InvalidSlotLabel("14:15".into()), StatusCode::BAD_REQUEST, "invalid_slot_label")]
#[case(
    BookingError::SlotInPast { date: sample_date(), slot: "09:00".parse().unwrap() },
    StatusCode::BAD_REQUEST,
    "slot_in_past"
)]
#[case(
    BookingError::SlotAlreadyBooked { date: sample_date(), slot: "09:00".parse().unwrap() },
    StatusCode::CONFLICT,
    "slot_taken"
)]
#[case(BookingError::Validation("bad input".into()), StatusCode::BAD_REQUEST, "validation")]
#[case(BookingError::NotFound("no such row".into()), StatusCode::NOT_FOUND, "not_found")]
#[case(
    BookingError::StoreUnavailable(eyre::eyre!("down")),
    StatusCode::INTERNAL_SERVER_ERROR,
    "store_unavailable"
)]
#[tokio::test]
async fn test_error_mapping(
    #[case] err: BookingError,
    #[case] expected_status: StatusCode,
    #[case] expected_code: &str,
) {
    let message = err.to_string();
    let (status, body) = response_parts(err).await;

    assert_eq!(status, expected_status);
    assert_eq!(body["code"], expected_code);
    assert_eq!(body["error"], message.as_str());
}

#[tokio::test]
async fn test_eyre_reports_convert_to_store_unavailable() {
    let err: AppError = eyre::eyre!("pool exhausted").into();

    assert!(matches!(err, AppError(BookingError::StoreUnavailable(_))));
}
