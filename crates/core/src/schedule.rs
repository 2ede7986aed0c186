//! The scheduling engine: slot grid, business-timezone clock, and the
//! availability rules built on top of both.

pub mod availability;
pub mod clock;
pub mod slots;

pub use availability::{available_slots, check_bookable, check_within_horizon, BOOKING_HORIZON_DAYS};
pub use clock::{day_bounds, local_date, BusinessClock, FixedClock, SystemClock, BUSINESS_TZ};
pub use slots::{SlotLabel, SLOT_GRID};
