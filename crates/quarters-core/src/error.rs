//! Errors returned by registry, allocation, and reporting operations.

use quarters_logic::rules::RoomKind;

/// Errors surfaced synchronously to the immediate caller. None are retried:
/// capacity exhaustion is a steady state, not a transient condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    /// A room or person with the same identity key is already registered.
    DuplicateEntity { key: String },
    /// Identity key is empty or whitespace.
    InvalidEntity { key: String },
    /// No registered person has this contact address.
    PersonNotFound { contact: String },
    /// No registered room has this name.
    RoomNotFound { name: String },
    /// No room of the required kind has spare capacity. Non-fatal: the
    /// person stays registered, just unassigned.
    NoCapacity { kind: RoomKind },
    /// Reallocation target is at capacity.
    RoomFull { name: String },
    /// Staff may never hold a residence.
    Ineligible { contact: String },
    /// The person already holds an assignment of this kind; use reallocation
    /// to move them.
    AlreadyAllocated { contact: String, kind: RoomKind },
    /// A report was requested but no person holds any assignment.
    EmptyState,
}

impl std::fmt::Display for RosterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterError::DuplicateEntity { key } => {
                write!(f, "'{}' is already registered", key)
            }
            RosterError::InvalidEntity { key } => {
                write!(f, "'{}' is not a usable identity key", key)
            }
            RosterError::PersonNotFound { contact } => {
                write!(f, "no person registered under '{}'", contact)
            }
            RosterError::RoomNotFound { name } => {
                write!(f, "no room named '{}'", name)
            }
            RosterError::NoCapacity { kind } => {
                write!(f, "no {} has spare capacity", kind.label())
            }
            RosterError::RoomFull { name } => {
                write!(f, "room '{}' is full", name)
            }
            RosterError::Ineligible { contact } => {
                write!(f, "staff '{}' cannot hold a residence", contact)
            }
            RosterError::AlreadyAllocated { contact, kind } => {
                write!(f, "'{}' already holds a {}", contact, kind.label())
            }
            RosterError::EmptyState => {
                write!(f, "no allocations have been made")
            }
        }
    }
}

impl std::error::Error for RosterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = RosterError::NoCapacity {
            kind: RoomKind::Residence,
        };
        assert_eq!(err.to_string(), "no residence has spare capacity");

        let err = RosterError::RoomFull {
            name: "Red".into(),
        };
        assert_eq!(err.to_string(), "room 'Red' is full");
    }
}
