//! Employee domain record.
//!
//! # Responsibility
//! - Define the employee record shape owned by the persistent store.
//! - Validate name/email fields before persistence.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another employee.
//! - `name` is non-empty; the prefix index lowercases it on insertion.

use crate::model::{now_epoch_ms, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an employee record.
pub type EmployeeId = Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Employee record persisted in the store.
///
/// In-memory indexes hold the `uuid` only, never a copy of this record,
/// so displayed fields are always re-read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub uuid: EmployeeId,
    pub name: String,
    pub email: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Employee {
    /// Creates an employee record with a generated stable id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
            created_at: now_epoch_ms(),
        }
    }

    /// Checks record fields against persistence requirements.
    ///
    /// # Errors
    /// - `EmptyEmployeeName` when the trimmed name is empty.
    /// - `InvalidEmail` when the email does not match `local@domain.tld`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyEmployeeName);
        }
        if !EMAIL_RE.is_match(self.email.trim()) {
            return Err(ValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Employee;
    use crate::model::ValidationError;

    #[test]
    fn new_employee_passes_validation() {
        let employee = Employee::new("Alice Smith", "alice@example.com");
        assert!(!employee.uuid.is_nil());
        assert!(employee.created_at > 0);
        assert!(employee.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let employee = Employee::new("   ", "alice@example.com");
        assert_eq!(
            employee.validate(),
            Err(ValidationError::EmptyEmployeeName)
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["", "alice", "alice@", "@example.com", "a b@example.com"] {
            let employee = Employee::new("Alice Smith", email);
            assert!(
                matches!(employee.validate(), Err(ValidationError::InvalidEmail(_))),
                "email `{email}` should be rejected"
            );
        }
    }
}
