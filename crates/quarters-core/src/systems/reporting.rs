//! Reporting system - read-only occupancy queries.
//!
//! Reports carry structured data; the render functions produce the
//! pre-formatted text views on explicit request only.

use hecs::Entity;
use serde::{Deserialize, Serialize};

use quarters_logic::rules::RoomKind;

use super::allocation::assignment;
use crate::components::{Contact, Lodging, Room, Workstation};
use crate::error::RosterError;
use crate::registry::Registry;

/// A person as reported: display name plus identity key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub name: String,
    pub contact: String,
}

/// Occupants of one room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAllocation {
    pub kind: RoomKind,
    pub room: String,
    pub occupants: Vec<PersonEntry>,
}

/// Persons still waiting for a room, per category and room kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnallocatedReport {
    pub staff_without_workspace: Vec<PersonEntry>,
    pub members_without_workspace: Vec<PersonEntry>,
    pub members_without_residence: Vec<PersonEntry>,
}

impl UnallocatedReport {
    pub fn is_empty(&self) -> bool {
        self.staff_without_workspace.is_empty()
            && self.members_without_workspace.is_empty()
            && self.members_without_residence.is_empty()
    }

    /// Text view in the roster banner style. Empty sections read "none".
    pub fn render(&self) -> String {
        format!(
            "STAFF WITHOUT A WORKSPACE:\n\
             ----------------------------\n\
             {}\n\n\
             MEMBERS WITHOUT A WORKSPACE:\n\
             ----------------------------\n\
             {}\n\n\
             MEMBERS WITHOUT A RESIDENCE:\n\
             ----------------------------\n\
             {}\n",
            roll_call(&self.staff_without_workspace),
            roll_call(&self.members_without_workspace),
            roll_call(&self.members_without_residence),
        )
    }
}

/// Everyone occupying the named room, staff first then members, each in
/// registration order. A person is "in" a room if either assignment slot
/// names it.
pub fn persons_in_room(
    registry: &Registry,
    room_name: &str,
) -> Result<Vec<PersonEntry>, RosterError> {
    if registry.find_room(room_name).is_none() {
        return Err(RosterError::RoomNotFound {
            name: room_name.into(),
        });
    }

    let mut occupants = Vec::new();
    for &person in registry.staff().iter().chain(registry.members()) {
        if occupies(registry, person, room_name) {
            if let Some(entry) = entry(registry, person) {
                occupants.push(entry);
            }
        }
    }
    Ok(occupants)
}

/// Occupancy listing for every room with at least one occupant, workspaces
/// first then residences, each in creation order.
pub fn all_allocations(registry: &Registry) -> Result<Vec<RoomAllocation>, RosterError> {
    let mut allocations = Vec::new();

    let rooms: Vec<Entity> = registry
        .workspaces()
        .iter()
        .chain(registry.residences())
        .copied()
        .collect();
    for room_entity in rooms {
        let Some((name, kind)) = room_info(registry, room_entity) else {
            continue;
        };

        let mut occupants = Vec::new();
        for &person in registry.staff().iter().chain(registry.members()) {
            if occupies(registry, person, &name) {
                if let Some(entry) = entry(registry, person) {
                    occupants.push(entry);
                }
            }
        }
        if !occupants.is_empty() {
            allocations.push(RoomAllocation {
                kind,
                room: name,
                occupants,
            });
        }
    }

    if allocations.is_empty() {
        return Err(RosterError::EmptyState);
    }
    Ok(allocations)
}

/// Text view of an allocation listing in the roster banner style.
pub fn render_allocations(allocations: &[RoomAllocation]) -> String {
    let mut output = String::new();
    for allocation in allocations {
        output.push_str(&format!(
            "({}) {}:\n\
             ----------------------------\n\
             {}\n\n",
            allocation.kind.label().to_uppercase(),
            allocation.room.to_uppercase(),
            roll_call(&allocation.occupants),
        ));
    }
    output
}

/// Staff with no workspace, members with no workspace, members with no
/// residence, each in registration order. Sequences are genuinely empty
/// when nobody is waiting; `render` substitutes the "none" marker.
pub fn unallocated(registry: &Registry) -> UnallocatedReport {
    let mut report = UnallocatedReport::default();

    for &person in registry.staff() {
        if slot_empty(registry, person, RoomKind::Workspace) {
            if let Some(entry) = entry(registry, person) {
                report.staff_without_workspace.push(entry);
            }
        }
    }
    for &person in registry.members() {
        if slot_empty(registry, person, RoomKind::Workspace) {
            if let Some(entry) = entry(registry, person) {
                report.members_without_workspace.push(entry);
            }
        }
        if slot_empty(registry, person, RoomKind::Residence) {
            if let Some(entry) = entry(registry, person) {
                report.members_without_residence.push(entry);
            }
        }
    }

    report
}

fn slot_empty(registry: &Registry, person: Entity, kind: RoomKind) -> bool {
    matches!(assignment(registry, person, kind), Some(None))
}

fn occupies(registry: &Registry, person: Entity, room_name: &str) -> bool {
    let at_desk = registry
        .world()
        .get::<&Workstation>(person)
        .map(|w| w.room.as_deref() == Some(room_name))
        .unwrap_or(false);
    if at_desk {
        return true;
    }
    registry
        .world()
        .get::<&Lodging>(person)
        .map(|l| l.room.as_deref() == Some(room_name))
        .unwrap_or(false)
}

fn entry(registry: &Registry, person: Entity) -> Option<PersonEntry> {
    registry
        .world()
        .get::<&Contact>(person)
        .ok()
        .map(|c| PersonEntry {
            name: c.name.clone(),
            contact: c.address.clone(),
        })
}

fn room_info(registry: &Registry, room: Entity) -> Option<(String, RoomKind)> {
    registry
        .world()
        .get::<&Room>(room)
        .ok()
        .map(|r| (r.name.clone(), r.kind))
}

fn roll_call(entries: &[PersonEntry]) -> String {
    if entries.is_empty() {
        return "none".into();
    }
    entries
        .iter()
        .map(|e| e.name.to_uppercase())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarters_logic::rules::Category;

    use crate::systems::allocation::{allocate_residence, allocate_workspace};
    use crate::systems::reallocation::reallocate;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();
        registry.create_residence("Haven").unwrap();

        registry.register_staff("Amara Obi", "amara@org.test").unwrap();
        allocate_workspace(&mut registry, "amara@org.test", Category::Staff, &mut rng).unwrap();

        registry.register_member("John Doe", "jdoe@org.test").unwrap();
        allocate_workspace(&mut registry, "jdoe@org.test", Category::Member, &mut rng).unwrap();
        allocate_residence(&mut registry, "jdoe@org.test", &mut rng).unwrap();

        registry.register_member("Jane Roe", "jroe@org.test").unwrap();
        registry
    }

    #[test]
    fn test_persons_in_room_order() {
        let registry = sample_registry();

        let occupants = persons_in_room(&registry, "Red").unwrap();
        let contacts: Vec<&str> = occupants.iter().map(|p| p.contact.as_str()).collect();
        // Staff first, then members
        assert_eq!(contacts, ["amara@org.test", "jdoe@org.test"]);

        let lodgers = persons_in_room(&registry, "Haven").unwrap();
        assert_eq!(lodgers.len(), 1);
        assert_eq!(lodgers[0].contact, "jdoe@org.test");
    }

    #[test]
    fn test_persons_in_unknown_room() {
        let registry = sample_registry();
        assert!(matches!(
            persons_in_room(&registry, "Atlantis"),
            Err(RosterError::RoomNotFound { .. })
        ));
    }

    #[test]
    fn test_all_allocations_covers_occupied_rooms() {
        let registry = sample_registry();
        let allocations = all_allocations(&registry).unwrap();

        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].kind, RoomKind::Workspace);
        assert_eq!(allocations[0].room, "Red");
        assert_eq!(allocations[0].occupants.len(), 2);
        assert_eq!(allocations[1].kind, RoomKind::Residence);
        assert_eq!(allocations[1].room, "Haven");
    }

    #[test]
    fn test_all_allocations_skips_empty_rooms() {
        let mut registry = Registry::new();
        registry.create_workspace("Red").unwrap();
        registry.create_workspace("Empty").unwrap();
        registry.register_member("John Doe", "jdoe@org.test").unwrap();
        // Place John directly so "Empty" is guaranteed to stay empty
        reallocate(&mut registry, "jdoe@org.test", "Red").unwrap();

        let allocations = all_allocations(&registry).unwrap();
        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].room, "Red");
    }

    #[test]
    fn test_empty_state() {
        let mut registry = Registry::new();
        registry.create_workspace("Red").unwrap();
        registry.register_member("John Doe", "jdoe@org.test").unwrap();

        // Rooms and persons exist but nothing is allocated
        assert_eq!(all_allocations(&registry), Err(RosterError::EmptyState));
    }

    #[test]
    fn test_unallocated_buckets() {
        let registry = sample_registry();
        let report = unallocated(&registry);

        assert!(report.staff_without_workspace.is_empty());
        let contacts: Vec<&str> = report
            .members_without_workspace
            .iter()
            .map(|p| p.contact.as_str())
            .collect();
        assert_eq!(contacts, ["jroe@org.test"]);
        // Jane never asked for a residence but still lacks one
        assert_eq!(report.members_without_residence.len(), 1);
    }

    #[test]
    fn test_render_substitutes_none() {
        let registry = sample_registry();
        let text = unallocated(&registry).render();

        assert!(text.contains("STAFF WITHOUT A WORKSPACE:\n----------------------------\nnone"));
        assert!(text.contains("JANE ROE"));
    }

    #[test]
    fn test_render_allocations_banner() {
        let registry = sample_registry();
        let text = render_allocations(&all_allocations(&registry).unwrap());

        assert!(text.contains("(WORKSPACE) RED:"));
        assert!(text.contains("AMARA OBI, JOHN DOE"));
        assert!(text.contains("(RESIDENCE) HAVEN:"));
    }
}
