//! Roster engine - the in-process API surface for CLI, bulk-loader, and
//! persistence collaborators.
//!
//! The engine owns the registry; every mutating operation takes `&mut self`,
//! so filter→choose→commit and the reallocation steps each run as one
//! uninterrupted critical section. The engine reports through the `log`
//! facade only; presenting errors and output to users is the caller's job.

use std::io::{Read, Write};

use log::{debug, warn};

use quarters_logic::intake::{validate_record, IntakeError, IntakeRecord};
use quarters_logic::rules::Category;

use crate::error::RosterError;
use crate::persistence::{self, Snapshot, SnapshotError};
use crate::registry::Registry;
use crate::systems::{allocation, reallocation, reporting};
use crate::systems::{PersonEntry, RoomAllocation, UnallocatedReport};

/// Rooms granted during one admission. `None` means the matching allocation
/// went unfulfilled for lack of capacity; the person is registered anyway.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AdmitOutcome {
    pub workspace: Option<String>,
    pub residence: Option<String>,
}

/// Main entry point for tracking room occupancy.
pub struct RosterEngine {
    registry: Registry,
}

impl RosterEngine {
    /// Create an engine with an empty registry.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
        }
    }

    /// Read access to the registry for collaborators and tests.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn create_workspace(&mut self, name: &str) -> Result<(), RosterError> {
        self.registry.create_workspace(name)?;
        debug!("created workspace '{}'", name);
        Ok(())
    }

    pub fn create_residence(&mut self, name: &str) -> Result<(), RosterError> {
        self.registry.create_residence(name)?;
        debug!("created residence '{}'", name);
        Ok(())
    }

    pub fn register_member(&mut self, name: &str, contact: &str) -> Result<(), RosterError> {
        self.registry.register_member(name, contact)?;
        debug!("registered member {}", contact);
        Ok(())
    }

    pub fn register_staff(&mut self, name: &str, contact: &str) -> Result<(), RosterError> {
        self.registry.register_staff(name, contact)?;
        debug!("registered staff {}", contact);
        Ok(())
    }

    /// Assign a uniformly random workspace with spare capacity.
    pub fn allocate_workspace(
        &mut self,
        contact: &str,
        category: Category,
    ) -> Result<String, RosterError> {
        let mut rng = rand::thread_rng();
        allocation::allocate_workspace(&mut self.registry, contact, category, &mut rng)
    }

    /// Assign a uniformly random residence with spare capacity (members only).
    pub fn allocate_residence(&mut self, contact: &str) -> Result<String, RosterError> {
        let mut rng = rand::thread_rng();
        allocation::allocate_residence(&mut self.registry, contact, &mut rng)
    }

    /// Move an already-registered person to a named destination room.
    pub fn reallocate(&mut self, contact: &str, destination: &str) -> Result<(), RosterError> {
        reallocation::reallocate(&mut self.registry, contact, destination)
    }

    /// Admit one intake record: register, then allocate a workspace and,
    /// for members who asked, a residence. Capacity exhaustion is not an
    /// error here; the unfulfilled slot comes back as `None`.
    pub fn admit(&mut self, record: &IntakeRecord) -> Result<AdmitOutcome, RosterError> {
        if let Some(problem) = validate_record(record).into_iter().next() {
            let key = match problem {
                IntakeError::EmptyName => record.name.clone(),
                IntakeError::EmptyContact => record.contact.clone(),
            };
            return Err(RosterError::InvalidEntity { key });
        }

        debug!("admitting {} {}", record.category.label(), record.contact);
        match record.category {
            Category::Member => self.register_member(&record.name, &record.contact)?,
            Category::Staff => self.register_staff(&record.name, &record.contact)?,
        }

        let workspace = match self.allocate_workspace(&record.contact, record.category) {
            Ok(room) => Some(room),
            Err(RosterError::NoCapacity { kind }) => {
                warn!("no {} capacity for {}", kind.label(), record.contact);
                None
            }
            Err(e) => return Err(e),
        };

        // wants_residence is ignored for staff
        let residence = if record.category.may_lodge() && record.wants_residence {
            match self.allocate_residence(&record.contact) {
                Ok(room) => Some(room),
                Err(RosterError::NoCapacity { kind }) => {
                    warn!("no {} capacity for {}", kind.label(), record.contact);
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        Ok(AdmitOutcome {
            workspace,
            residence,
        })
    }

    /// Everyone occupying the named room.
    pub fn persons_in_room(&self, room_name: &str) -> Result<Vec<PersonEntry>, RosterError> {
        reporting::persons_in_room(&self.registry, room_name)
    }

    /// Occupancy listing for every room with at least one occupant.
    pub fn all_allocations(&self) -> Result<Vec<RoomAllocation>, RosterError> {
        reporting::all_allocations(&self.registry)
    }

    /// Persons still waiting for a room.
    pub fn unallocated(&self) -> UnallocatedReport {
        reporting::unallocated(&self.registry)
    }

    /// Extract the registry contents for the persistence collaborator.
    pub fn export_all(&self) -> Snapshot {
        persistence::export_all(&self.registry)
    }

    /// Replace the registry contents with a snapshot's.
    pub fn import_all(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        persistence::import_all(&mut self.registry, snapshot)
    }

    /// Save the registry to a writer as a bincode-encoded snapshot.
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SnapshotError> {
        persistence::save_roster(writer, &self.registry)
    }

    /// Load a snapshot from a reader, replacing the registry contents.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SnapshotError> {
        persistence::load_roster(reader, &mut self.registry)
    }

    /// Reset all four collections.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    pub fn workspace_count(&self) -> usize {
        self.registry.workspace_count()
    }

    pub fn residence_count(&self) -> usize {
        self.registry.residence_count()
    }

    pub fn member_count(&self) -> usize {
        self.registry.member_count()
    }

    pub fn staff_count(&self) -> usize {
        self.registry.staff_count()
    }
}

impl Default for RosterEngine {
    fn default() -> Self {
        Self::new()
    }
}
