//! Employee-to-task assignment index.
//!
//! # Responsibility
//! - Map each employee id to the ordered list of open task ids assigned
//!   to them.
//!
//! # Invariants
//! - Lists are created lazily; operating on an unknown employee id is
//!   never an error.
//! - A task id appears at most once per employee list.

use crate::model::employee::EmployeeId;
use crate::model::task::TaskId;
use std::collections::HashMap;

/// Derived mapping from employee id to assigned task ids.
#[derive(Debug, Default)]
pub struct AssignmentIndex {
    assignments: HashMap<EmployeeId, Vec<TaskId>>,
}

impl AssignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty list for the employee if none exists yet.
    pub fn ensure_employee(&mut self, employee_id: EmployeeId) {
        self.assignments.entry(employee_id).or_default();
    }

    /// Appends `task_id` to the employee's list if not already present.
    /// No-op when the pair is already recorded.
    pub fn assign(&mut self, employee_id: EmployeeId, task_id: TaskId) {
        let tasks = self.assignments.entry(employee_id).or_default();
        if !tasks.contains(&task_id) {
            tasks.push(task_id);
        }
    }

    /// Removes `task_id` from the employee's list if present; no-op
    /// otherwise (covers completion of a task that had no assignee).
    pub fn unassign_on_complete(&mut self, employee_id: EmployeeId, task_id: TaskId) {
        if let Some(tasks) = self.assignments.get_mut(&employee_id) {
            tasks.retain(|id| *id != task_id);
        }
    }

    /// Current task id list for the employee; empty if unindexed.
    pub fn list_for(&self, employee_id: EmployeeId) -> &[TaskId] {
        self.assignments
            .get(&employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Discards all entries.
    pub fn clear(&mut self) {
        self.assignments.clear();
    }
}
