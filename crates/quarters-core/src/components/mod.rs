//! Components attached to registry entities.
//!
//! Components are pure data. The registry and systems own all logic.

mod people;
mod rooms;

pub use people::*;
pub use rooms::*;
