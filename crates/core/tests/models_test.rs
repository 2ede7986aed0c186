use bookslot_core::models::appointment::{
    Appointment, BookingStatus, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use chrono::{NaiveDate, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use uuid::Uuid;

#[rstest]
#[case(BookingStatus::Pending, "pending", true)]
#[case(BookingStatus::Confirmed, "confirmed", true)]
#[case(BookingStatus::Completed, "completed", true)]
#[case(BookingStatus::Cancelled, "cancelled", false)]
fn test_booking_status_wire_form_and_slot_holding(
    #[case] status: BookingStatus,
    #[case] wire: &str,
    #[case] holds: bool,
) {
    assert_eq!(to_string(&status).unwrap(), format!("\"{wire}\""));
    assert_eq!(from_str::<BookingStatus>(&format!("\"{wire}\"")).unwrap(), status);
    assert_eq!(status.as_str(), wire);
    assert_eq!(status.holds_slot(), holds);
}

#[test]
fn test_booking_status_rejects_unknown_values() {
    assert!(from_str::<BookingStatus>("\"rescheduled\"").is_err());
    assert!("rescheduled".parse::<BookingStatus>().is_err());
}

#[test]
fn test_appointment_serialization_round_trip() {
    let appointment = Appointment {
        id: Uuid::new_v4(),
        name: "Dana Smith".to_string(),
        phone_number: "5551234567".to_string(),
        email: "dana@example.com".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 13).unwrap(),
        time: "10:30".parse().unwrap(),
        status: BookingStatus::Pending,
        notes: Some("first visit".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = to_string(&appointment).unwrap();
    let back: Appointment = from_str(&json).unwrap();

    assert_eq!(back.id, appointment.id);
    assert_eq!(back.date, appointment.date);
    assert_eq!(back.time, appointment.time);
    assert_eq!(back.status, appointment.status);
    assert!(json.contains("\"10:30\""));
    assert!(json.contains("\"2025-06-13\""));
}

#[test]
fn test_create_request_deserializes_from_form_payload() {
    let payload = r#"{
        "name": "Dana Smith",
        "phone_number": "5551234567",
        "email": "dana@example.com",
        "date": "2025-06-13",
        "time": "10:30",
        "notes": null
    }"#;

    let request: CreateAppointmentRequest = from_str(payload).unwrap();

    assert_eq!(request.date, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());
    assert_eq!(request.time, "10:30");
    assert_eq!(request.notes, None);
}

#[test]
fn test_update_request_requires_valid_status() {
    let ok: UpdateAppointmentRequest =
        from_str(r#"{"status":"confirmed","notes":"see you then"}"#).unwrap();
    assert_eq!(ok.status, BookingStatus::Confirmed);

    assert!(from_str::<UpdateAppointmentRequest>(r#"{"status":"held"}"#).is_err());
}
