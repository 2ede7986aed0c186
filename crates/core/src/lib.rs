//! # BookSlot Core
//!
//! Domain types and the scheduling engine for the BookSlot appointment
//! service. This crate is pure: it performs no I/O, which keeps the
//! availability rules directly testable with a pinned clock.
//!
//! The interesting parts live in [`schedule`]:
//!
//! - [`schedule::clock`]: the single place civil dates and absolute
//!   instants are converted, always through the fixed business timezone
//! - [`schedule::slots`]: the canonical daily slot grid and the
//!   [`schedule::slots::SlotLabel`] value type
//! - [`schedule::availability`]: which slots are offerable for a date, and
//!   the re-check a booking must pass before it is committed

pub mod errors;
pub mod models;
pub mod schedule;
