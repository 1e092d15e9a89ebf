//! Registry - shared mutable store of rooms and persons.
//!
//! Entities live in a `hecs` world; four rosters keep the insertion order of
//! each collection, which `hecs` iteration does not guarantee on its own.

use hecs::{Entity, World};

use quarters_logic::rules::{valid_identity, Category, RoomKind};

use crate::components::{Contact, Lodging, Member, Person, Room, Staff, Workstation};
use crate::error::RosterError;

/// In-memory store of the four entity collections: workspaces, residences,
/// members, staff. Constructed once and borrowed by the allocation,
/// reallocation, and reporting systems.
pub struct Registry {
    world: World,
    workspaces: Vec<Entity>,
    residences: Vec<Entity>,
    members: Vec<Entity>,
    staff: Vec<Entity>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            world: World::new(),
            workspaces: Vec::new(),
            residences: Vec::new(),
            members: Vec::new(),
            staff: Vec::new(),
        }
    }

    /// Read access to the underlying entity world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Register a new workspace. The name must not collide with any
    /// existing room of either kind.
    pub fn create_workspace(&mut self, name: &str) -> Result<Entity, RosterError> {
        self.create_room(name, RoomKind::Workspace)
    }

    /// Register a new residence. The name must not collide with any
    /// existing room of either kind.
    pub fn create_residence(&mut self, name: &str) -> Result<Entity, RosterError> {
        self.create_room(name, RoomKind::Residence)
    }

    fn create_room(&mut self, name: &str, kind: RoomKind) -> Result<Entity, RosterError> {
        if !valid_identity(name) {
            return Err(RosterError::InvalidEntity { key: name.into() });
        }
        if self.find_room(name).is_some() {
            return Err(RosterError::DuplicateEntity { key: name.into() });
        }

        let entity = self.world.spawn((Room::new(name, kind),));
        self.roster_mut(kind).push(entity);
        Ok(entity)
    }

    /// Register a new member. The contact address must be unique among
    /// members.
    pub fn register_member(&mut self, name: &str, contact: &str) -> Result<Entity, RosterError> {
        self.check_person_identity(Category::Member, name, contact)?;

        let entity = self.world.spawn((
            Person,
            Contact::new(name, contact),
            Member,
            Workstation::default(),
            Lodging::default(),
        ));
        self.members.push(entity);
        Ok(entity)
    }

    /// Register a new staff person. The contact address must be unique
    /// among staff. Staff entities carry no residence slot.
    pub fn register_staff(&mut self, name: &str, contact: &str) -> Result<Entity, RosterError> {
        self.check_person_identity(Category::Staff, name, contact)?;

        let entity = self.world.spawn((
            Person,
            Contact::new(name, contact),
            Staff,
            Workstation::default(),
        ));
        self.staff.push(entity);
        Ok(entity)
    }

    fn check_person_identity(
        &self,
        category: Category,
        name: &str,
        contact: &str,
    ) -> Result<(), RosterError> {
        if !valid_identity(name) {
            return Err(RosterError::InvalidEntity { key: name.into() });
        }
        if !valid_identity(contact) {
            return Err(RosterError::InvalidEntity { key: contact.into() });
        }
        if self.find_person_in(category, contact).is_some() {
            return Err(RosterError::DuplicateEntity {
                key: contact.into(),
            });
        }
        Ok(())
    }

    /// Find a room by name, searching workspaces then residences.
    pub fn find_room(&self, name: &str) -> Option<Entity> {
        self.workspaces
            .iter()
            .chain(self.residences.iter())
            .copied()
            .find(|&entity| {
                self.world
                    .get::<&Room>(entity)
                    .map(|room| room.name == name)
                    .unwrap_or(false)
            })
    }

    /// Find a person by contact address, searching members then staff.
    pub fn find_person(&self, contact: &str) -> Option<Entity> {
        self.find_person_in(Category::Member, contact)
            .or_else(|| self.find_person_in(Category::Staff, contact))
    }

    /// Find a person by contact address within one category's collection.
    pub fn find_person_in(&self, category: Category, contact: &str) -> Option<Entity> {
        self.persons(category).iter().copied().find(|&entity| {
            self.world
                .get::<&Contact>(entity)
                .map(|c| c.address == contact)
                .unwrap_or(false)
        })
    }

    /// Rooms of one kind, in creation order.
    pub fn rooms(&self, kind: RoomKind) -> &[Entity] {
        match kind {
            RoomKind::Workspace => &self.workspaces,
            RoomKind::Residence => &self.residences,
        }
    }

    /// Persons of one category, in registration order.
    pub fn persons(&self, category: Category) -> &[Entity] {
        match category {
            Category::Member => &self.members,
            Category::Staff => &self.staff,
        }
    }

    pub fn workspaces(&self) -> &[Entity] {
        &self.workspaces
    }

    pub fn residences(&self) -> &[Entity] {
        &self.residences
    }

    pub fn members(&self) -> &[Entity] {
        &self.members
    }

    pub fn staff(&self) -> &[Entity] {
        &self.staff
    }

    pub fn workspace_count(&self) -> usize {
        self.workspaces.len()
    }

    pub fn residence_count(&self) -> usize {
        self.residences.len()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn staff_count(&self) -> usize {
        self.staff.len()
    }

    /// Reset all four collections.
    pub fn clear(&mut self) {
        self.world.clear();
        self.workspaces.clear();
        self.residences.clear();
        self.members.clear();
        self.staff.clear();
    }

    fn roster_mut(&mut self, kind: RoomKind) -> &mut Vec<Entity> {
        match kind {
            RoomKind::Workspace => &mut self.workspaces,
            RoomKind::Residence => &mut self.residences,
        }
    }

    // Snapshot import bypasses the duplicate checks: the snapshot is trusted
    // to carry a registry that was valid when exported.

    pub(crate) fn restore_room(&mut self, room: Room) {
        let kind = room.kind;
        let entity = self.world.spawn((room,));
        self.roster_mut(kind).push(entity);
    }

    pub(crate) fn restore_member(
        &mut self,
        contact: Contact,
        workstation: Workstation,
        lodging: Lodging,
    ) {
        let entity = self
            .world
            .spawn((Person, contact, Member, workstation, lodging));
        self.members.push(entity);
    }

    pub(crate) fn restore_staff(&mut self, contact: Contact, workstation: Workstation) {
        let entity = self.world.spawn((Person, contact, Staff, workstation));
        self.staff.push(entity);
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
