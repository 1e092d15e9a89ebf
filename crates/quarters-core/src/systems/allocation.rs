//! Allocation system - capacity-bounded random assignment.
//!
//! Both operations share one filter→choose→commit routine parameterized over
//! room kind. The choice is uniform over the rooms with spare capacity: no
//! bias toward fill level, no deterministic tie-break.

use hecs::Entity;
use log::debug;
use rand::Rng;

use quarters_logic::rules::{Category, RoomKind};

use crate::components::{Lodging, Room, Workstation};
use crate::error::RosterError;
use crate::registry::Registry;

/// Assign a random workspace with spare capacity to the person registered
/// under `contact` in the `category` collection. Returns the chosen room's
/// name.
pub fn allocate_workspace(
    registry: &mut Registry,
    contact: &str,
    category: Category,
    rng: &mut impl Rng,
) -> Result<String, RosterError> {
    let person =
        registry
            .find_person_in(category, contact)
            .ok_or_else(|| RosterError::PersonNotFound {
                contact: contact.into(),
            })?;
    assign_random(registry, person, contact, RoomKind::Workspace, rng)
}

/// Assign a random residence with spare capacity to a member. Staff are
/// never passed here: the lookup only covers the member collection.
pub fn allocate_residence(
    registry: &mut Registry,
    contact: &str,
    rng: &mut impl Rng,
) -> Result<String, RosterError> {
    let person = registry
        .find_person_in(Category::Member, contact)
        .ok_or_else(|| RosterError::PersonNotFound {
            contact: contact.into(),
        })?;
    assign_random(registry, person, contact, RoomKind::Residence, rng)
}

/// Filter rooms with vacancy, pick one uniformly at random, commit the
/// assignment on both the room and the person record.
fn assign_random(
    registry: &mut Registry,
    person: Entity,
    contact: &str,
    kind: RoomKind,
    rng: &mut impl Rng,
) -> Result<String, RosterError> {
    match assignment(registry, person, kind) {
        // Re-rolling an existing assignment goes through reallocation
        Some(Some(_)) => {
            return Err(RosterError::AlreadyAllocated {
                contact: contact.into(),
                kind,
            })
        }
        Some(None) => {}
        None => {
            return Err(RosterError::Ineligible {
                contact: contact.into(),
            })
        }
    }

    let candidates: Vec<(Entity, String)> = registry
        .rooms(kind)
        .iter()
        .copied()
        .filter_map(|entity| {
            let room = registry.world().get::<&Room>(entity).ok()?;
            room.has_vacancy().then(|| (entity, room.name.clone()))
        })
        .collect();

    if candidates.is_empty() {
        return Err(RosterError::NoCapacity { kind });
    }

    let (chosen, room_name) = candidates[rng.gen_range(0..candidates.len())].clone();

    if let Ok(mut room) = registry.world_mut().get::<&mut Room>(chosen) {
        room.occupants += 1;
    }
    set_assignment(registry, person, kind, Some(room_name.clone()));

    debug!("allocated {} '{}' to {}", kind.label(), room_name, contact);
    Ok(room_name)
}

/// The person's assignment slot for a room kind. Outer `None` means the
/// person cannot hold this kind at all (staff have no residence slot).
pub(crate) fn assignment(
    registry: &Registry,
    person: Entity,
    kind: RoomKind,
) -> Option<Option<String>> {
    match kind {
        RoomKind::Workspace => registry
            .world()
            .get::<&Workstation>(person)
            .ok()
            .map(|w| w.room.clone()),
        RoomKind::Residence => registry
            .world()
            .get::<&Lodging>(person)
            .ok()
            .map(|l| l.room.clone()),
    }
}

pub(crate) fn set_assignment(
    registry: &mut Registry,
    person: Entity,
    kind: RoomKind,
    room: Option<String>,
) {
    match kind {
        RoomKind::Workspace => {
            if let Ok(mut slot) = registry.world_mut().get::<&mut Workstation>(person) {
                slot.room = room;
            }
        }
        RoomKind::Residence => {
            if let Ok(mut slot) = registry.world_mut().get::<&mut Lodging>(person) {
                slot.room = room;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupants(registry: &Registry, name: &str) -> u32 {
        let entity = registry.find_room(name).unwrap();
        registry.world().get::<&Room>(entity).unwrap().occupants
    }

    #[test]
    fn test_allocate_fills_single_workspace() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();

        for i in 0..3 {
            let contact = format!("person{}@org.test", i);
            registry.register_member("Test Person", &contact).unwrap();
            let room = allocate_workspace(&mut registry, &contact, Category::Member, &mut rng)
                .unwrap();
            assert_eq!(room, "Red");
        }

        assert_eq!(occupants(&registry, "Red"), 3);
    }

    #[test]
    fn test_no_capacity_leaves_counts_unchanged() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();

        for i in 0..6 {
            let contact = format!("person{}@org.test", i);
            registry.register_staff("Test Person", &contact).unwrap();
            allocate_workspace(&mut registry, &contact, Category::Staff, &mut rng).unwrap();
        }

        registry.register_staff("One Too Many", "extra@org.test").unwrap();
        let result = allocate_workspace(&mut registry, "extra@org.test", Category::Staff, &mut rng);
        assert_eq!(
            result,
            Err(RosterError::NoCapacity {
                kind: RoomKind::Workspace
            })
        );
        assert_eq!(occupants(&registry, "Red"), 6);

        // The person stays registered, just unassigned
        let person = registry.find_person("extra@org.test").unwrap();
        assert_eq!(assignment(&registry, person, RoomKind::Workspace), Some(None));
    }

    #[test]
    fn test_capacity_bound_holds_over_many_rooms() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        for i in 0..5 {
            registry.create_residence(&format!("res-{}", i)).unwrap();
        }

        // 5 residences take at most 20 members
        for i in 0..20 {
            let contact = format!("member{}@org.test", i);
            registry.register_member("Test Member", &contact).unwrap();
            allocate_residence(&mut registry, &contact, &mut rng).unwrap();
        }

        for i in 0..5 {
            let name = format!("res-{}", i);
            assert!(occupants(&registry, &name) <= RoomKind::Residence.capacity());
        }

        registry.register_member("Test Member", "late@org.test").unwrap();
        let result = allocate_residence(&mut registry, "late@org.test", &mut rng);
        assert_eq!(
            result,
            Err(RosterError::NoCapacity {
                kind: RoomKind::Residence
            })
        );
    }

    #[test]
    fn test_second_allocation_rejected() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();
        registry.create_workspace("Green").unwrap();
        registry.register_member("John Doe", "jdoe@org.test").unwrap();

        allocate_workspace(&mut registry, "jdoe@org.test", Category::Member, &mut rng).unwrap();
        let result = allocate_workspace(&mut registry, "jdoe@org.test", Category::Member, &mut rng);
        assert_eq!(
            result,
            Err(RosterError::AlreadyAllocated {
                contact: "jdoe@org.test".into(),
                kind: RoomKind::Workspace
            })
        );

        // Exactly one occupancy recorded across both rooms
        assert_eq!(occupants(&registry, "Red") + occupants(&registry, "Green"), 1);
    }

    #[test]
    fn test_unknown_person() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();

        let result = allocate_workspace(&mut registry, "ghost@org.test", Category::Member, &mut rng);
        assert!(matches!(result, Err(RosterError::PersonNotFound { .. })));
    }

    #[test]
    fn test_category_selects_collection() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();
        registry.register_staff("Amara Obi", "amara@org.test").unwrap();

        // Staff contact is not found in the member collection
        let result = allocate_workspace(&mut registry, "amara@org.test", Category::Member, &mut rng);
        assert!(matches!(result, Err(RosterError::PersonNotFound { .. })));

        allocate_workspace(&mut registry, "amara@org.test", Category::Staff, &mut rng).unwrap();
        assert_eq!(occupants(&registry, "Red"), 1);
    }

    #[test]
    fn test_full_rooms_never_chosen() {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();
        registry.create_workspace("Green").unwrap();

        // Fill Red by hand; every allocation must then land in Green
        let red = registry.find_room("Red").unwrap();
        registry.world_mut().get::<&mut Room>(red).unwrap().occupants = 6;

        for i in 0..6 {
            let contact = format!("member{}@org.test", i);
            registry.register_member("Test Member", &contact).unwrap();
            let room =
                allocate_workspace(&mut registry, &contact, Category::Member, &mut rng).unwrap();
            assert_eq!(room, "Green");
        }
    }
}
