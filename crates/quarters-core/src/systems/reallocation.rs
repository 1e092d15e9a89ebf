//! Reallocation system - validated moves to a named destination room.
//!
//! All validation happens before any mutation, so a failed move leaves the
//! registry untouched.

use log::debug;

use quarters_logic::rules::RoomKind;

use super::allocation::{assignment, set_assignment};
use crate::components::Room;
use crate::error::RosterError;
use crate::registry::Registry;

/// Move the person registered under `contact` into the named room.
///
/// The destination may be of either kind; the person's assignment slot for
/// that kind is rewritten and both occupant counts adjusted. A person with
/// no previous room of that kind is simply placed (reallocation doubles as
/// a first-time placement).
pub fn reallocate(
    registry: &mut Registry,
    contact: &str,
    destination: &str,
) -> Result<(), RosterError> {
    let person = registry
        .find_person(contact)
        .ok_or_else(|| RosterError::PersonNotFound {
            contact: contact.into(),
        })?;
    let target = registry
        .find_room(destination)
        .ok_or_else(|| RosterError::RoomNotFound {
            name: destination.into(),
        })?;

    let room = registry
        .world()
        .get::<&Room>(target)
        .map(|r| (*r).clone())
        .map_err(|_| RosterError::RoomNotFound {
            name: destination.into(),
        })?;

    let current = assignment(registry, person, room.kind);

    // Moving someone into the room they already occupy changes nothing.
    if let Some(Some(held)) = &current {
        if *held == room.name {
            return Ok(());
        }
    }

    if room.is_full() {
        return Err(RosterError::RoomFull { name: room.name });
    }

    let Some(previous) = current else {
        // Staff have no residence slot
        return Err(RosterError::Ineligible {
            contact: contact.into(),
        });
    };

    // Commit: the previous room of the same kind gives one occupant back,
    // the destination gains one.
    if let Some(previous_name) = previous {
        if let Some(previous_room) = registry.find_room(&previous_name) {
            if let Ok(mut prev) = registry.world_mut().get::<&mut Room>(previous_room) {
                prev.occupants = prev.occupants.saturating_sub(1);
            }
        }
    }
    if let Ok(mut dest) = registry.world_mut().get::<&mut Room>(target) {
        dest.occupants += 1;
    }
    set_assignment(registry, person, room.kind, Some(room.name.clone()));

    debug!(
        "reallocated {} to {} '{}'",
        contact,
        room.kind.label(),
        room.name
    );
    Ok(())
}
