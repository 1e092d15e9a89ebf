//! Room component.

use quarters_logic::rules::{self, RoomKind};
use serde::{Deserialize, Serialize};

/// Room component - a shared space with a hard occupancy ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique across both room kinds.
    pub name: String,
    pub kind: RoomKind,
    /// Number of persons currently assigned here.
    pub occupants: u32,
}

impl Room {
    pub fn new(name: impl Into<String>, kind: RoomKind) -> Self {
        Self {
            name: name.into(),
            kind,
            occupants: 0,
        }
    }

    /// Occupancy ceiling for this room's kind.
    pub fn capacity(&self) -> u32 {
        self.kind.capacity()
    }

    /// True while the room can still take another occupant.
    pub fn has_vacancy(&self) -> bool {
        rules::has_vacancy(self.kind, self.occupants)
    }

    pub fn is_full(&self) -> bool {
        !self.has_vacancy()
    }
}
