//! Project domain record.
//!
//! Projects are pass-through records: persisted and listed, never indexed
//! in memory.

use crate::model::{now_epoch_ms, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a project record.
pub type ProjectId = Uuid;

/// Project record persisted in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub uuid: ProjectId,
    pub name: String,
    pub description: String,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
}

impl Project {
    /// Creates a project record with a generated stable id.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            created_at: now_epoch_ms(),
        }
    }

    /// Checks record fields against persistence requirements.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        Ok(())
    }
}
