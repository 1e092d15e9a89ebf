//! Room kinds, person categories, and the capacity/eligibility rules
//! that bound every allocation.

use serde::{Deserialize, Serialize};

/// Maximum occupants of a workspace.
pub const WORKSPACE_CAPACITY: u32 = 6;

/// Maximum occupants of a residence.
pub const RESIDENCE_CAPACITY: u32 = 4;

/// The two kinds of shared room an organization tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomKind {
    /// Shared working space, open to every person category.
    Workspace,
    /// Shared living space, open to members only.
    Residence,
}

impl RoomKind {
    /// Hard occupancy ceiling for this kind of room.
    pub fn capacity(&self) -> u32 {
        match self {
            RoomKind::Workspace => WORKSPACE_CAPACITY,
            RoomKind::Residence => RESIDENCE_CAPACITY,
        }
    }

    /// Display noun, lowercase.
    pub fn label(&self) -> &'static str {
        match self {
            RoomKind::Workspace => "workspace",
            RoomKind::Residence => "residence",
        }
    }
}

/// Person category. Members may hold both room kinds, staff only a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Member,
    Staff,
}

impl Category {
    /// Whether this category may ever hold a residence assignment.
    pub fn may_lodge(&self) -> bool {
        matches!(self, Category::Member)
    }

    /// Whether this category may occupy a room of the given kind.
    pub fn may_occupy(&self, kind: RoomKind) -> bool {
        match kind {
            RoomKind::Workspace => true,
            RoomKind::Residence => self.may_lodge(),
        }
    }

    /// Display noun, lowercase.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Member => "member",
            Category::Staff => "staff",
        }
    }
}

/// Remaining slots in a room of the given kind.
pub fn open_slots(kind: RoomKind, occupants: u32) -> u32 {
    kind.capacity().saturating_sub(occupants)
}

/// True while the room can still take another occupant.
pub fn has_vacancy(kind: RoomKind, occupants: u32) -> bool {
    occupants < kind.capacity()
}

/// An identity key (room name or contact address) must carry at least one
/// non-whitespace character.
pub fn valid_identity(key: &str) -> bool {
    !key.trim().is_empty()
}
