//! Priority-ordered task scheduler.
//!
//! # Responsibility
//! - Keep task snapshots ordered by descending priority, then ascending
//!   due time.
//! - Re-materialize wholesale from a full store snapshot after any task
//!   mutation.
//!
//! # Invariants
//! - Contents are snapshot copies, never live references; staleness is
//!   resolved by `rebuild_from`, not by in-place edits.
//! - `DUE_EPOCH_NONE` sorts after every concrete due time at equal
//!   priority.
//! - Tasks with identical priority and due time keep their relative input
//!   order within one snapshot.

use crate::model::task::Task;
use std::cmp::Reverse;

/// Ordered in-memory cache of task snapshots, open and completed.
#[derive(Debug, Default)]
pub struct TaskScheduler {
    // Kept sorted by `ordering_key` at all times.
    tasks: Vec<Task>,
}

fn ordering_key(task: &Task) -> (Reverse<i32>, i64) {
    (Reverse(task.priority), task.due_epoch)
}

impl TaskScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards current contents and reloads from a full snapshot of
    /// persisted tasks.
    ///
    /// Must run after any mutation that changes a task's priority, due
    /// time, status or assignee; the wholesale rebuild is the consistency
    /// strategy for this structure.
    pub fn rebuild_from(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        // Stable sort: equal-key tasks keep store snapshot order.
        self.tasks.sort_by_key(ordering_key);
    }

    /// Places a single task snapshot at its ordered position without a
    /// rebuild. First-insertion path only; existing snapshots are never
    /// updated through this.
    pub fn insert(&mut self, task: Task) {
        let key = ordering_key(&task);
        let position = self
            .tasks
            .partition_point(|existing| ordering_key(existing) <= key);
        self.tasks.insert(position, task);
    }

    /// Finite, restartable iterator over the ordered task snapshots.
    pub fn snapshot_ordered(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::TaskScheduler;
    use crate::model::task::{Task, TaskStatus, DUE_EPOCH_NONE};

    fn task(title: &str, priority: i32, due_epoch: i64) -> Task {
        Task::new(title, "", priority, due_epoch)
    }

    fn titles(scheduler: &TaskScheduler) -> Vec<String> {
        scheduler
            .snapshot_ordered()
            .map(|task| task.title.clone())
            .collect()
    }

    #[test]
    fn higher_priority_comes_first() {
        let mut scheduler = TaskScheduler::new();
        scheduler.rebuild_from(vec![
            task("low", 1, 100),
            task("high", 5, 100),
            task("mid", 3, 100),
        ]);

        assert_eq!(titles(&scheduler), ["high", "mid", "low"]);
    }

    #[test]
    fn earlier_due_comes_first_at_equal_priority() {
        let mut scheduler = TaskScheduler::new();
        scheduler.rebuild_from(vec![
            task("later", 3, 2_000),
            task("none", 3, DUE_EPOCH_NONE),
            task("sooner", 3, 1_000),
        ]);

        assert_eq!(titles(&scheduler), ["sooner", "later", "none"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let mut scheduler = TaskScheduler::new();
        scheduler.rebuild_from(vec![
            task("first", 2, 500),
            task("second", 2, 500),
            task("third", 2, 500),
        ]);

        assert_eq!(titles(&scheduler), ["first", "second", "third"]);
    }

    #[test]
    fn insert_places_task_in_order() {
        let mut scheduler = TaskScheduler::new();
        scheduler.insert(task("mid", 3, 100));
        scheduler.insert(task("high", 5, 100));
        scheduler.insert(task("low", 1, DUE_EPOCH_NONE));
        scheduler.insert(task("mid-late", 3, 900));

        assert_eq!(titles(&scheduler), ["high", "mid", "mid-late", "low"]);
    }

    #[test]
    fn insert_after_equal_keys_is_stable() {
        let mut scheduler = TaskScheduler::new();
        scheduler.insert(task("first", 2, 500));
        scheduler.insert(task("second", 2, 500));

        assert_eq!(titles(&scheduler), ["first", "second"]);
    }

    #[test]
    fn rebuild_discards_previous_contents() {
        let mut scheduler = TaskScheduler::new();
        scheduler.insert(task("stale", 5, 1));
        scheduler.rebuild_from(vec![task("fresh", 1, 1)]);

        assert_eq!(titles(&scheduler), ["fresh"]);
        assert_eq!(scheduler.len(), 1);
    }

    #[test]
    fn snapshot_is_restartable() {
        let mut scheduler = TaskScheduler::new();
        scheduler.rebuild_from(vec![task("a", 2, 1), task("b", 1, 1)]);

        let first: Vec<_> = scheduler.snapshot_ordered().map(|t| t.uuid).collect();
        let second: Vec<_> = scheduler.snapshot_ordered().map(|t| t.uuid).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn completed_tasks_stay_in_the_snapshot() {
        let mut completed = task("done", 4, 100);
        completed.status = TaskStatus::Completed;
        completed.completed_at = Some(1);

        let mut scheduler = TaskScheduler::new();
        scheduler.rebuild_from(vec![completed, task("open", 2, 100)]);

        assert_eq!(titles(&scheduler), ["done", "open"]);
    }
}
