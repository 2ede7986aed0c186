//! The canonical daily slot grid and the `SlotLabel` value type.
//!
//! Every bookable time in the system is one of the fixed half-hour slots
//! below. Labels arriving from the outside (request bodies, stored rows) are
//! parsed through [`SlotLabel::from_str`], which rejects anything not on the
//! grid, so the rest of the engine only ever sees valid slots.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::BookingError;

/// Start time of one 30-minute booking slot, e.g. `09:30`.
///
/// Ordering follows time of day, so sorting a list of labels yields the
/// grid's ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlotLabel {
    hour: u8,
    minute: u8,
}

const fn slot(hour: u8, minute: u8) -> SlotLabel {
    SlotLabel { hour, minute }
}

/// The fixed daily grid, ascending. Changing business hours means changing
/// this list.
pub const SLOT_GRID: [SlotLabel; 18] = [
    slot(9, 0),
    slot(9, 30),
    slot(10, 0),
    slot(10, 30),
    slot(11, 0),
    slot(11, 30),
    slot(12, 0),
    slot(12, 30),
    slot(13, 0),
    slot(13, 30),
    slot(14, 0),
    slot(14, 30),
    slot(15, 0),
    slot(15, 30),
    slot(16, 0),
    slot(16, 30),
    slot(17, 0),
    slot(17, 30),
];

impl SlotLabel {
    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    /// True if the slot starts at or before the given local (hour, minute).
    /// Equality counts as passed: a slot starting right now can no longer be
    /// prepared for.
    pub fn has_passed(&self, hour: u32, minute: u32) -> bool {
        (self.hour as u32, self.minute as u32) <= (hour, minute)
    }
}

impl fmt::Display for SlotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for SlotLabel {
    type Err = BookingError;

    /// Strict "HH:MM" parse, then grid membership. `9:00`, `10:15`, and
    /// `18:00` are all rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::InvalidSlotLabel(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hour: u8 = h.parse().map_err(|_| invalid())?;
        let minute: u8 = m.parse().map_err(|_| invalid())?;

        let label = SlotLabel { hour, minute };
        if SLOT_GRID.contains(&label) {
            Ok(label)
        } else {
            Err(invalid())
        }
    }
}

impl Serialize for SlotLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SlotLabel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
