//! Admission records.
//!
//! Bulk-loading collaborators feed people into the engine one record at a
//! time. The record shape is fixed here so loaders, the engine, and saved
//! intake batches all agree on it.

use serde::{Deserialize, Serialize};

use crate::rules::{valid_identity, Category};

/// One person to admit: register, then allocate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeRecord {
    /// Unique contact address — the person's identity key.
    pub contact: String,
    /// Display name.
    pub name: String,
    pub category: Category,
    /// Request a residence as well as a workspace.
    /// Meaningless for staff; consumers must ignore it.
    pub wants_residence: bool,
}

impl IntakeRecord {
    pub fn new(
        contact: impl Into<String>,
        name: impl Into<String>,
        category: Category,
        wants_residence: bool,
    ) -> Self {
        Self {
            contact: contact.into(),
            name: name.into(),
            category,
            wants_residence,
        }
    }
}

/// Intake record validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    /// Name is empty or whitespace.
    EmptyName,
    /// Contact address is empty or whitespace.
    EmptyContact,
}

/// Validate an intake record, returning all errors found.
pub fn validate_record(record: &IntakeRecord) -> Vec<IntakeError> {
    let mut errors = Vec::new();

    if !valid_identity(&record.name) {
        errors.push(IntakeError::EmptyName);
    }
    if !valid_identity(&record.contact) {
        errors.push(IntakeError::EmptyContact);
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_record() {
        let record = IntakeRecord::new("jdoe@org.test", "John Doe", Category::Member, true);
        assert!(validate_record(&record).is_empty());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let record = IntakeRecord::new("  ", "", Category::Staff, false);
        let errors = validate_record(&record);
        assert!(errors.contains(&IntakeError::EmptyName));
        assert!(errors.contains(&IntakeError::EmptyContact));
    }

    #[test]
    fn test_serde_roundtrip() {
        let record = IntakeRecord::new("amara@org.test", "Amara Obi", Category::Staff, false);
        let json = serde_json::to_string(&record).unwrap();
        let back: IntakeRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
