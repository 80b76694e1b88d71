//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert/find/update APIs over the `tasks` collection.
//! - Keep status and assignee transitions inside the persistence boundary.
//!
//! # Invariants
//! - `set_assignee` and `mark_completed` are the only mutation paths; both
//!   report `NotFound` when zero rows change.
//! - Listing order is deterministic insertion order; ordering for
//!   scheduling is the scheduler's concern, not the store's.

use crate::model::employee::EmployeeId;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    details,
    priority,
    due_epoch,
    assigned_to,
    status,
    created_at,
    completed_at
FROM tasks";

/// Repository interface for the task collection.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Full snapshot of the collection; the scheduler rebuilds from this.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Persists the assignee field of an existing task.
    fn set_assignee(&self, id: TaskId, employee_id: EmployeeId) -> RepoResult<()>;
    /// Persists the completed status and completion timestamp.
    fn mark_completed(&self, id: TaskId, completed_at: i64) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                details,
                priority,
                due_epoch,
                assigned_to,
                status,
                created_at,
                completed_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
            params![
                task.uuid.to_string(),
                task.title.as_str(),
                task.details.as_str(),
                task.priority,
                task.due_epoch,
                task.assigned_to.map(|id| id.to_string()),
                task_status_to_db(task.status),
                task.created_at,
                task.completed_at,
            ],
        )?;

        Ok(task.uuid)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }

        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY created_at ASC, rowid ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn set_assignee(&self, id: TaskId, employee_id: EmployeeId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET assigned_to = ?1 WHERE uuid = ?2;",
            params![employee_id.to_string(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn mark_completed(&self, id: TaskId, completed_at: i64) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE tasks SET status = ?1, completed_at = ?2 WHERE uuid = ?3;",
            params![
                task_status_to_db(TaskStatus::Completed),
                completed_at,
                id.to_string()
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let assigned_to = match row.get::<_, Option<String>>("assigned_to")? {
        Some(value) => Some(Uuid::parse_str(&value).map_err(|_| {
            RepoError::InvalidData(format!("invalid uuid value `{value}` in tasks.assigned_to"))
        })?),
        None => None,
    };

    let status_text: String = row.get("status")?;
    let status = parse_task_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid task status `{status_text}` in tasks.status"))
    })?;

    let task = Task {
        uuid,
        title: row.get("title")?,
        details: row.get("details")?,
        priority: row.get("priority")?,
        due_epoch: row.get("due_epoch")?,
        assigned_to,
        status,
        created_at: row.get("created_at")?,
        completed_at: row.get("completed_at")?,
    };
    task.validate()?;
    Ok(task)
}

fn task_status_to_db(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "OPEN",
        TaskStatus::Completed => "COMPLETED",
    }
}

fn parse_task_status(value: &str) -> Option<TaskStatus> {
    match value {
        "OPEN" => Some(TaskStatus::Open),
        "COMPLETED" => Some(TaskStatus::Completed),
        _ => None,
    }
}
