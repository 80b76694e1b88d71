//! Task domain record and scheduling fields.
//!
//! # Responsibility
//! - Define the task record shape owned by the persistent store.
//! - Keep the "no due date" sentinel in one place.
//!
//! # Invariants
//! - `status` transitions one way: `Open` -> `Completed`.
//! - `completed_at` is set exactly when `status == Completed`.
//! - `due_epoch == DUE_EPOCH_NONE` sorts after every concrete due time at
//!   equal priority.

use crate::model::employee::EmployeeId;
use crate::model::{now_epoch_ms, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task record.
pub type TaskId = Uuid;

/// Sentinel due time meaning "no due date / infinitely late".
pub const DUE_EPOCH_NONE: i64 = i64::MAX;

/// Lowest accepted task priority.
pub const TASK_PRIORITY_MIN: i32 = 1;
/// Highest accepted task priority; higher is more urgent.
pub const TASK_PRIORITY_MAX: i32 = 5;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Open,
    Completed,
}

/// Task record persisted in the store.
///
/// The scheduler holds copies of this record taken at one point in time;
/// a copy can go stale relative to the store until the next rebuild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub uuid: TaskId,
    pub title: String,
    pub details: String,
    /// Higher value is more urgent. Accepted range is
    /// `TASK_PRIORITY_MIN..=TASK_PRIORITY_MAX`.
    pub priority: i32,
    /// Due time in epoch seconds, or [`DUE_EPOCH_NONE`].
    pub due_epoch: i64,
    pub assigned_to: Option<EmployeeId>,
    pub status: TaskStatus,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    /// Completion time in epoch milliseconds, set on completion only.
    pub completed_at: Option<i64>,
}

impl Task {
    /// Creates an open, unassigned task with a generated stable id.
    ///
    /// Callers map "no due date" input to [`DUE_EPOCH_NONE`] via
    /// [`Task::due_epoch_from_input`] before construction.
    pub fn new(
        title: impl Into<String>,
        details: impl Into<String>,
        priority: i32,
        due_epoch: i64,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            details: details.into(),
            priority,
            due_epoch,
            assigned_to: None,
            status: TaskStatus::Open,
            created_at: now_epoch_ms(),
            completed_at: None,
        }
    }

    /// Maps the command-surface convention "0 means no due date" to the
    /// internal sentinel.
    pub fn due_epoch_from_input(due_epoch_or_zero: i64) -> i64 {
        if due_epoch_or_zero == 0 {
            DUE_EPOCH_NONE
        } else {
            due_epoch_or_zero
        }
    }

    /// Returns whether this task carries a concrete due time.
    pub fn has_due_date(&self) -> bool {
        self.due_epoch != DUE_EPOCH_NONE
    }

    pub fn is_open(&self) -> bool {
        self.status == TaskStatus::Open
    }

    /// Checks record fields against persistence requirements.
    ///
    /// # Errors
    /// - `EmptyTaskTitle` when the trimmed title is empty.
    /// - `PriorityOutOfRange` when priority is outside the accepted range.
    /// - `NegativeDueEpoch` when the due time is negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        if !(TASK_PRIORITY_MIN..=TASK_PRIORITY_MAX).contains(&self.priority) {
            return Err(ValidationError::PriorityOutOfRange(self.priority));
        }
        if self.due_epoch < 0 {
            return Err(ValidationError::NegativeDueEpoch(self.due_epoch));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Task, TaskStatus, DUE_EPOCH_NONE};
    use crate::model::ValidationError;

    #[test]
    fn new_task_starts_open_and_unassigned() {
        let task = Task::new("Fix bug", "login flow", 3, DUE_EPOCH_NONE);
        assert_eq!(task.status, TaskStatus::Open);
        assert_eq!(task.assigned_to, None);
        assert_eq!(task.completed_at, None);
        assert!(!task.has_due_date());
        assert!(task.validate().is_ok());
    }

    #[test]
    fn zero_due_input_maps_to_sentinel() {
        assert_eq!(Task::due_epoch_from_input(0), DUE_EPOCH_NONE);
        assert_eq!(Task::due_epoch_from_input(1_700_000_000), 1_700_000_000);
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        for priority in [0, -1, 6] {
            let task = Task::new("Deploy", "", priority, DUE_EPOCH_NONE);
            assert_eq!(
                task.validate(),
                Err(ValidationError::PriorityOutOfRange(priority))
            );
        }
    }

    #[test]
    fn negative_due_epoch_is_rejected() {
        let task = Task::new("Deploy", "", 2, -5);
        assert_eq!(task.validate(), Err(ValidationError::NegativeDueEpoch(-5)));
    }
}
