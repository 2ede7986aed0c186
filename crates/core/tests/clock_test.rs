use bookslot_core::schedule::clock::{day_bounds, local_date, BusinessClock, FixedClock};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use pretty_assertions::assert_eq;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_day_bounds_in_standard_time() {
    // Mid-January: Chicago is UTC-6.
    let (start, end) = day_bounds(date(2025, 1, 15));

    assert_eq!(start, Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2025, 1, 16, 6, 0, 0).unwrap());
}

#[test]
fn test_day_bounds_in_daylight_time() {
    // Mid-July: Chicago is UTC-5.
    let (start, end) = day_bounds(date(2025, 7, 10));

    assert_eq!(start, Utc.with_ymd_and_hms(2025, 7, 10, 5, 0, 0).unwrap());
    assert_eq!(end, Utc.with_ymd_and_hms(2025, 7, 11, 5, 0, 0).unwrap());
}

#[test]
fn test_day_bounds_across_dst_transitions() {
    // Spring forward: 2025-03-09 has 23 hours; fall back: 2025-11-02 has 25.
    let (start, end) = day_bounds(date(2025, 3, 9));
    assert_eq!(end - start, Duration::hours(23));

    let (start, end) = day_bounds(date(2025, 11, 2));
    assert_eq!(end - start, Duration::hours(25));
}

#[test]
fn test_consecutive_days_tile_without_gap() {
    let (_, end_of_first) = day_bounds(date(2025, 3, 8));
    let (start_of_second, _) = day_bounds(date(2025, 3, 9));

    assert_eq!(end_of_first, start_of_second);
}

#[test]
fn test_local_date_near_midnight() {
    // 05:59Z on Jan 15 is still 23:59 on Jan 14 in Chicago.
    let before = Utc.with_ymd_and_hms(2025, 1, 15, 5, 59, 0).unwrap();
    let after = Utc.with_ymd_and_hms(2025, 1, 15, 6, 0, 0).unwrap();

    assert_eq!(local_date(before), date(2025, 1, 14));
    assert_eq!(local_date(after), date(2025, 1, 15));
}

#[test]
fn test_fixed_clock_reports_pinned_local_time() {
    let clock = FixedClock::at_local(date(2025, 6, 12), 14, 5);

    let now = clock.now_local();
    assert_eq!(now.date_naive(), date(2025, 6, 12));
    assert_eq!(now.format("%H:%M").to_string(), "14:05");

    assert_eq!(clock.today(), date(2025, 6, 12));
    assert!(clock.is_today(date(2025, 6, 12)));
    assert!(!clock.is_today(date(2025, 6, 13)));
}
