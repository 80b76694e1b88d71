//! Domain model for employee, project and task records.
//!
//! # Responsibility
//! - Define canonical data structures owned by the persistent store.
//! - Enforce record-level validation before persistence.
//!
//! # Invariants
//! - Every record is identified by a stable uuid-v4 id, immutable once
//!   created.
//! - Timestamps are epoch milliseconds from the system clock.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub mod employee;
pub mod project;
pub mod task;

/// Validation failure for record fields, surfaced before any store call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    EmptyEmployeeName,
    InvalidEmail(String),
    EmptyProjectName,
    EmptyTaskTitle,
    PriorityOutOfRange(i32),
    NegativeDueEpoch(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEmployeeName => write!(f, "employee name must not be empty"),
            Self::InvalidEmail(email) => write!(f, "invalid email address: `{email}`"),
            Self::EmptyProjectName => write!(f, "project name must not be empty"),
            Self::EmptyTaskTitle => write!(f, "task title must not be empty"),
            Self::PriorityOutOfRange(priority) => write!(
                f,
                "task priority {priority} out of range {}..={}",
                task::TASK_PRIORITY_MIN,
                task::TASK_PRIORITY_MAX
            ),
            Self::NegativeDueEpoch(due) => write!(f, "task due epoch {due} must not be negative"),
        }
    }
}

impl Error for ValidationError {}

/// Current system time as epoch milliseconds.
///
/// Clamps to zero for clocks before the epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}
