//! Quarters Core - Allocation & Roster Engine
//!
//! Tracks room occupancy for an organization with two person categories
//! (members and supporting staff), assigning them to shared workspaces and
//! optionally to shared residences.
//!
//! # Architecture
//!
//! Entities live in an Entity Component System world via `hecs`:
//! - **Entities**: People and rooms
//! - **Components**: Pure data attached to entities (Contact, Room, Workstation, etc.)
//! - **Systems**: Allocation, reallocation, and reporting logic over the registry
//!
//! Allocation is uniform-random among rooms with spare capacity — never
//! best-fit or preference-based.
//!
//! # Example
//!
//! ```rust
//! use quarters_core::prelude::*;
//!
//! let mut engine = RosterEngine::new();
//!
//! engine.create_workspace("Red").unwrap();
//! engine.register_member("John Doe", "jdoe@org.test").unwrap();
//! let room = engine.allocate_workspace("jdoe@org.test", Category::Member).unwrap();
//! assert_eq!(room, "Red");
//! ```

pub mod components;
pub mod engine;
pub mod error;
pub mod persistence;
pub mod registry;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::RosterEngine;
    pub use crate::error::RosterError;
    pub use crate::registry::Registry;
    pub use quarters_logic::rules::{Category, RoomKind};
}
