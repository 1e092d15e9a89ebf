//! Person components: Contact, role markers, and assignment slots.

use serde::{Deserialize, Serialize};

/// Marker component identifying an entity as a person
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Person;

/// Identity component. The contact address is the person's unique key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub name: String,
    pub address: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Role component - only attached to members (not staff)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Member;

/// Role component - only attached to staff (not members)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Staff;

/// Workspace assignment slot, present on every person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workstation {
    /// Name of the assigned workspace, if any.
    pub room: Option<String>,
}

impl Workstation {
    pub fn assigned_to(room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
        }
    }
}

/// Residence assignment slot. Members only; a staff entity never carries
/// this component, which is what makes staff structurally ineligible for
/// residence allocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lodging {
    /// Name of the assigned residence, if any.
    pub room: Option<String>,
}

impl Lodging {
    pub fn assigned_to(room: impl Into<String>) -> Self {
        Self {
            room: Some(room.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact() {
        let contact = Contact::new("John Doe", "jdoe@org.test");
        assert_eq!(contact.name, "John Doe");
        assert_eq!(contact.address, "jdoe@org.test");
    }

    #[test]
    fn test_assignment_slots_default_empty() {
        assert_eq!(Workstation::default().room, None);
        assert_eq!(Lodging::default().room, None);
    }

    #[test]
    fn test_assigned_to() {
        assert_eq!(Workstation::assigned_to("Red").room.as_deref(), Some("Red"));
        assert_eq!(Lodging::assigned_to("Blue").room.as_deref(), Some("Blue"));
    }
}
