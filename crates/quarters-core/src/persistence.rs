//! Snapshot export/import for the persistence collaborator.
//!
//! The registry serializes to a plain `Snapshot` of records that round-trips
//! every entity field exactly: identities, assignments, occupancy counts,
//! and insertion order. Binary encoding uses bincode; a JSON view exists for
//! debuggable exports.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use quarters_logic::rules::RoomKind;

use crate::components::{Contact, Lodging, Room, Workstation};
use crate::registry::Registry;

/// Version number for the snapshot format (increment when format changes)
const SNAPSHOT_VERSION: u32 = 1;

/// One room as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub name: String,
    pub kind: RoomKind,
    pub occupants: u32,
}

/// One member as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    pub contact: String,
    pub workspace: Option<String>,
    pub residence: Option<String>,
}

/// One staff person as persisted. Staff never hold a residence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub name: String,
    pub contact: String,
    pub workspace: Option<String>,
}

/// Serializable snapshot of the whole registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version
    pub version: u32,
    pub workspaces: Vec<RoomRecord>,
    pub residences: Vec<RoomRecord>,
    pub members: Vec<MemberRecord>,
    pub staff: Vec<StaffRecord>,
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Extract the registry contents into a snapshot.
pub fn export_all(registry: &Registry) -> Snapshot {
    let room_records = |kind: RoomKind| -> Vec<RoomRecord> {
        registry
            .rooms(kind)
            .iter()
            .filter_map(|&entity| {
                let room = registry.world().get::<&Room>(entity).ok()?;
                Some(RoomRecord {
                    name: room.name.clone(),
                    kind: room.kind,
                    occupants: room.occupants,
                })
            })
            .collect()
    };

    let members = registry
        .members()
        .iter()
        .filter_map(|&entity| {
            let contact = registry.world().get::<&Contact>(entity).ok()?;
            let workstation = registry.world().get::<&Workstation>(entity).ok()?;
            let lodging = registry.world().get::<&Lodging>(entity).ok()?;
            Some(MemberRecord {
                name: contact.name.clone(),
                contact: contact.address.clone(),
                workspace: workstation.room.clone(),
                residence: lodging.room.clone(),
            })
        })
        .collect();

    let staff = registry
        .staff()
        .iter()
        .filter_map(|&entity| {
            let contact = registry.world().get::<&Contact>(entity).ok()?;
            let workstation = registry.world().get::<&Workstation>(entity).ok()?;
            Some(StaffRecord {
                name: contact.name.clone(),
                contact: contact.address.clone(),
                workspace: workstation.room.clone(),
            })
        })
        .collect();

    Snapshot {
        version: SNAPSHOT_VERSION,
        workspaces: room_records(RoomKind::Workspace),
        residences: room_records(RoomKind::Residence),
        members,
        staff,
    }
}

/// Replace the registry contents with a snapshot's.
///
/// The snapshot is trusted as exported: records are restored verbatim
/// without re-running duplicate checks or recomputing occupancy.
pub fn import_all(registry: &mut Registry, snapshot: Snapshot) -> Result<(), SnapshotError> {
    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    registry.clear();

    for record in snapshot.workspaces.into_iter().chain(snapshot.residences) {
        registry.restore_room(Room {
            name: record.name,
            kind: record.kind,
            occupants: record.occupants,
        });
    }
    for record in snapshot.members {
        registry.restore_member(
            Contact::new(record.name, record.contact),
            Workstation {
                room: record.workspace,
            },
            Lodging {
                room: record.residence,
            },
        );
    }
    for record in snapshot.staff {
        registry.restore_staff(
            Contact::new(record.name, record.contact),
            Workstation {
                room: record.workspace,
            },
        );
    }

    Ok(())
}

/// Save the registry to a writer as a bincode-encoded snapshot.
pub fn save_roster<W: Write>(writer: W, registry: &Registry) -> Result<(), SnapshotError> {
    bincode::serialize_into(writer, &export_all(registry))?;
    Ok(())
}

/// Load a snapshot from a reader and replace the registry contents.
pub fn load_roster<R: Read>(reader: R, registry: &mut Registry) -> Result<(), SnapshotError> {
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;
    import_all(registry, snapshot)
}

/// Errors that can occur during snapshot encode/decode
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    Json(serde_json::Error),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        SnapshotError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(e)
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(e: serde_json::Error) -> Self {
        SnapshotError::Json(e)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(e) => write!(f, "IO error: {}", e),
            SnapshotError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SnapshotError::Json(e) => write!(f, "JSON error: {}", e),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

#[cfg(test)]
mod tests {
    use super::*;
    use quarters_logic::rules::Category;

    use crate::systems::allocation::{allocate_residence, allocate_workspace};

    fn populated_registry() -> Registry {
        let mut registry = Registry::new();
        let mut rng = rand::thread_rng();
        registry.create_workspace("Red").unwrap();
        registry.create_residence("Haven").unwrap();

        registry.register_member("John Doe", "jdoe@org.test").unwrap();
        allocate_workspace(&mut registry, "jdoe@org.test", Category::Member, &mut rng).unwrap();
        allocate_residence(&mut registry, "jdoe@org.test", &mut rng).unwrap();

        registry.register_staff("Amara Obi", "amara@org.test").unwrap();
        allocate_workspace(&mut registry, "amara@org.test", Category::Staff, &mut rng).unwrap();

        registry.register_member("Jane Roe", "jroe@org.test").unwrap();
        registry
    }

    #[test]
    fn test_export_import_roundtrip() {
        let registry = populated_registry();
        let snapshot = export_all(&registry);

        let mut restored = Registry::new();
        import_all(&mut restored, snapshot.clone()).unwrap();

        // An identical registry exports an identical snapshot
        assert_eq!(export_all(&restored), snapshot);
        assert_eq!(restored.member_count(), 2);
        assert_eq!(restored.staff_count(), 1);

        let red = restored.find_room("Red").unwrap();
        let room = restored.world().get::<&Room>(red).unwrap();
        assert_eq!(room.occupants, 2);
    }

    #[test]
    fn test_import_replaces_contents() {
        let registry = populated_registry();
        let snapshot = export_all(&registry);

        let mut other = Registry::new();
        other.create_workspace("Stale").unwrap();
        import_all(&mut other, snapshot).unwrap();

        assert!(other.find_room("Stale").is_none());
        assert!(other.find_room("Red").is_some());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let registry = populated_registry();

        let mut buffer = Vec::new();
        save_roster(&mut buffer, &registry).unwrap();

        let mut loaded = Registry::new();
        load_roster(&buffer[..], &mut loaded).unwrap();

        assert_eq!(export_all(&loaded), export_all(&registry));
    }

    #[test]
    fn test_version_mismatch() {
        let registry = populated_registry();
        let mut snapshot = export_all(&registry);
        snapshot.version = 99;

        let mut restored = Registry::new();
        let result = import_all(&mut restored, snapshot);
        assert!(matches!(
            result,
            Err(SnapshotError::VersionMismatch {
                expected: 1,
                found: 99
            })
        ));
    }

    #[test]
    fn test_json_view_roundtrip() {
        let registry = populated_registry();
        let snapshot = export_all(&registry);

        let json = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
