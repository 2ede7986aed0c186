use bookslot_core::errors::BookingError;
use bookslot_core::schedule::slots::{SlotLabel, SLOT_GRID};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn test_grid_is_ascending_and_complete() {
    assert_eq!(SLOT_GRID.len(), 18);
    assert_eq!(SLOT_GRID[0].to_string(), "09:00");
    assert_eq!(SLOT_GRID[17].to_string(), "17:30");

    for pair in SLOT_GRID.windows(2) {
        assert!(pair[0] < pair[1], "{} should precede {}", pair[0], pair[1]);
    }
}

#[rstest]
#[case("09:00", 9, 0)]
#[case("12:30", 12, 30)]
#[case("17:30", 17, 30)]
fn test_parse_valid_labels(#[case] input: &str, #[case] hour: u8, #[case] minute: u8) {
    let label: SlotLabel = input.parse().expect("grid label should parse");
    assert_eq!(label.hour(), hour);
    assert_eq!(label.minute(), minute);
    assert_eq!(label.to_string(), input);
}

#[rstest]
#[case("9:00")] // not zero-padded
#[case("09:15")] // off-grid cadence
#[case("18:00")] // after closing
#[case("08:30")] // before opening
#[case("09:00:00")]
#[case("09-00")]
#[case("")]
#[case("aa:bb")]
fn test_parse_rejects_labels_outside_grid(#[case] input: &str) {
    match input.parse::<SlotLabel>() {
        Err(BookingError::InvalidSlotLabel(raw)) => assert_eq!(raw, input),
        other => panic!("expected InvalidSlotLabel for {input:?}, got {other:?}"),
    }
}

#[test]
fn test_has_passed_includes_equality() {
    let slot: SlotLabel = "14:00".parse().unwrap();

    assert!(slot.has_passed(14, 0), "a slot starting right now has passed");
    assert!(slot.has_passed(14, 5));
    assert!(!slot.has_passed(13, 59));
}

#[test]
fn test_serde_uses_label_string() {
    let slot: SlotLabel = "10:30".parse().unwrap();

    let json = serde_json::to_string(&slot).unwrap();
    assert_eq!(json, "\"10:30\"");

    let back: SlotLabel = serde_json::from_str(&json).unwrap();
    assert_eq!(back, slot);

    assert!(serde_json::from_str::<SlotLabel>("\"10:45\"").is_err());
}
