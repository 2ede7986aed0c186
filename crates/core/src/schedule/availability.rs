//! Slot availability rules.
//!
//! [`available_slots`] is the listing path: it computes the offerable slots
//! for a date from the canonical grid, the already-booked entries, and the
//! injected clock. [`check_bookable`] is the write path's re-validation: the
//! set a customer picked from may be stale by the time they submit, so the
//! same rules are re-applied to the single requested slot against a freshly
//! queried booked set before anything is committed.
//!
//! Both functions are pure over their inputs. True slot exclusivity under
//! concurrent bookings is the store's job (atomic conditional insert); the
//! checks here exist to give users a precise error before a write is
//! attempted, not to replace the store's guarantee.

use chrono::{NaiveDate, Timelike};

use crate::errors::{BookingError, BookingResult};
use crate::models::BookingStatus;
use crate::schedule::clock::BusinessClock;
use crate::schedule::slots::{SlotLabel, SLOT_GRID};

/// How far ahead bookings are accepted, in days from business-local today.
pub const BOOKING_HORIZON_DAYS: i64 = 30;

/// Computes the ordered list of slots offerable for `date` right now.
///
/// A slot is offered unless some non-cancelled entry already holds it, or
/// `date` is the current business day and the slot's start is at or before
/// the current local time. The result is always in ascending grid order and
/// must be recomputed per request: it depends on "now".
pub fn available_slots(
    clock: &dyn BusinessClock,
    date: NaiveDate,
    booked: &[(SlotLabel, BookingStatus)],
) -> Vec<SlotLabel> {
    let cutoff = clock.is_today(date).then(|| {
        let now = clock.now_local();
        (now.hour(), now.minute())
    });

    SLOT_GRID
        .iter()
        .copied()
        .filter(|slot| !slot_is_held(*slot, booked))
        .filter(|slot| match cutoff {
            Some((hour, minute)) => !slot.has_passed(hour, minute),
            None => true,
        })
        .collect()
}

/// Re-validates one requested slot immediately before commit.
///
/// Rejects dates before business-local today outright, slots at or before
/// the current time on the current day, and slots held by a non-cancelled
/// entry. Passing this check does not reserve anything; the store's
/// conditional insert remains the authority on conflicts.
pub fn check_bookable(
    clock: &dyn BusinessClock,
    date: NaiveDate,
    slot: SlotLabel,
    booked: &[(SlotLabel, BookingStatus)],
) -> BookingResult<()> {
    let today = clock.today();

    if date < today {
        return Err(BookingError::SlotInPast { date, slot });
    }

    if date == today {
        let now = clock.now_local();
        if slot.has_passed(now.hour(), now.minute()) {
            return Err(BookingError::SlotInPast { date, slot });
        }
    }

    if slot_is_held(slot, booked) {
        return Err(BookingError::SlotAlreadyBooked { date, slot });
    }

    Ok(())
}

/// Rejects a requested date outside the booking window: strictly before
/// today is handled by [`check_bookable`]; this guards the far end.
pub fn check_within_horizon(clock: &dyn BusinessClock, date: NaiveDate) -> BookingResult<()> {
    let today = clock.today();
    if (date - today).num_days() > BOOKING_HORIZON_DAYS {
        return Err(BookingError::Validation(format!(
            "Bookings are only accepted up to {BOOKING_HORIZON_DAYS} days ahead"
        )));
    }
    Ok(())
}

/// A slot is held if any entry for it is non-cancelled. Duplicate entries for
/// one slot should not exist, but if they do the slot stays unavailable as
/// long as one of them holds it.
fn slot_is_held(slot: SlotLabel, booked: &[(SlotLabel, BookingStatus)]) -> bool {
    booked
        .iter()
        .any(|(label, status)| *label == slot && status.holds_slot())
}
