//! Team management use-case service.
//!
//! # Responsibility
//! - Orchestrate store writes and index reconciliation for every mutating
//!   operation.
//! - Own the derived indexes and the history log as explicit state.
//!
//! # Invariants
//! - Two-phase sequence per mutation: (a) persist through the store
//!   adapter, (b) reconcile indexes and append history. A failed persist
//!   aborts the operation with no index update and no history entry.
//! - A failed reconcile after a successful persist surfaces as
//!   `IndexDivergence`; `resync_indexes` restores consistency on demand.
//! - Single-threaded: one operation runs to completion before the next.

use crate::index::assignment::AssignmentIndex;
use crate::index::history::{HistoryEntry, HistoryLog};
use crate::index::prefix::PrefixIndex;
use crate::index::scheduler::TaskScheduler;
use crate::model::employee::{Employee, EmployeeId};
use crate::model::project::Project;
use crate::model::task::{Task, TaskId, TaskStatus};
use crate::model::{now_epoch_ms, ValidationError};
use crate::repo::employee_repo::EmployeeRepository;
use crate::repo::project_repo::ProjectRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::RepoError;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Application-core error taxonomy.
#[derive(Debug)]
pub enum ServiceError {
    /// Malformed input, surfaced before any store call.
    InvalidInput(ValidationError),
    /// Referenced employee id absent from the store; no state mutated.
    EmployeeNotFound(EmployeeId),
    /// Referenced task id absent from the store; no state mutated.
    TaskNotFound(TaskId),
    /// Persist phase could not complete; reconcile did not run.
    Store(RepoError),
    /// Reconcile phase failed after a successful persist. Indexes may
    /// disagree with the store until `resync_indexes` runs.
    IndexDivergence {
        operation: &'static str,
        source: RepoError,
    },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(err) => write!(f, "invalid input: {err}"),
            Self::EmployeeNotFound(id) => write!(f, "employee not found: {id}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Store(err) => write!(f, "store operation failed: {err}"),
            Self::IndexDivergence { operation, source } => write!(
                f,
                "index divergence after `{operation}`: {source}; run a full index resync"
            ),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            Self::EmployeeNotFound(_) => None,
            Self::TaskNotFound(_) => None,
            Self::Store(err) => Some(err),
            Self::IndexDivergence { source, .. } => Some(source),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidInput(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidInput(err),
            other => Self::Store(other),
        }
    }
}

/// Application core: store adapters plus derived in-memory state.
///
/// Constructed at startup from a full store scan and passed by handle to
/// each operation; generic over the repository traits so tests can
/// substitute in-memory or failing stores.
pub struct TeamService<E, T, P>
where
    E: EmployeeRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    employees: E,
    tasks: T,
    projects: P,
    prefix: PrefixIndex,
    scheduler: TaskScheduler,
    assignments: AssignmentIndex,
    history: HistoryLog,
}

impl<E, T, P> TeamService<E, T, P>
where
    E: EmployeeRepository,
    T: TaskRepository,
    P: ProjectRepository,
{
    /// Builds the service and materializes all indexes from a full store
    /// scan.
    pub fn load(employees: E, tasks: T, projects: P) -> ServiceResult<Self> {
        let mut service = Self {
            employees,
            tasks,
            projects,
            prefix: PrefixIndex::new(),
            scheduler: TaskScheduler::new(),
            assignments: AssignmentIndex::new(),
            history: HistoryLog::new(),
        };
        service.scan_store()?;
        info!(
            "event=core_load module=service status=ok tasks={}",
            service.scheduler.len()
        );
        Ok(service)
    }

    /// Re-derives every index from the store on demand.
    ///
    /// This is the recovery path for `IndexDivergence`: explicit operator
    /// action, not automatic on next read.
    pub fn resync_indexes(&mut self) -> ServiceResult<()> {
        self.scan_store()?;
        info!(
            "event=index_resync module=service status=ok tasks={}",
            self.scheduler.len()
        );
        Ok(())
    }

    // Reads first, then swaps index contents, so a failed store read
    // leaves current indexes untouched.
    fn scan_store(&mut self) -> ServiceResult<()> {
        let employees = self.employees.list_employees()?;
        let tasks = self.tasks.list_tasks()?;

        self.prefix.clear();
        self.assignments.clear();
        for employee in &employees {
            self.prefix.insert(&employee.name, employee.uuid);
            self.assignments.ensure_employee(employee.uuid);
        }
        // Completed tasks keep their persisted assignee field but are not
        // re-indexed as active assignments.
        for task in tasks.iter().filter(|task| task.is_open()) {
            if let Some(employee_id) = task.assigned_to {
                self.assignments.assign(employee_id, task.uuid);
            }
        }
        self.scheduler.rebuild_from(tasks);
        Ok(())
    }

    /// Persists a new employee, then indexes the name and prepares an
    /// empty assignment list.
    pub fn add_employee(
        &mut self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> ServiceResult<Employee> {
        let employee = Employee::new(name, email);
        employee.validate()?;

        self.employees.create_employee(&employee)?;

        self.prefix.insert(&employee.name, employee.uuid);
        self.assignments.ensure_employee(employee.uuid);
        self.history.record(format!(
            "Added employee: {} ({})",
            employee.name, employee.uuid
        ));
        info!(
            "event=employee_add module=service status=ok employee_id={}",
            employee.uuid
        );
        Ok(employee)
    }

    /// Store pass-through.
    pub fn list_employees(&self) -> ServiceResult<Vec<Employee>> {
        Ok(self.employees.list_employees()?)
    }

    /// Persists a new project; projects are not indexed in memory.
    pub fn create_project(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> ServiceResult<Project> {
        let project = Project::new(name, description);
        project.validate()?;

        self.projects.create_project(&project)?;

        self.history.record(format!(
            "Created project: {} ({})",
            project.name, project.uuid
        ));
        info!(
            "event=project_create module=service status=ok project_id={}",
            project.uuid
        );
        Ok(project)
    }

    /// Store pass-through.
    pub fn list_projects(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.projects.list_projects()?)
    }

    /// Persists a new open task, then places its snapshot into the
    /// scheduler without a rebuild (no ordering fields change on first
    /// insertion).
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        details: impl Into<String>,
        priority: i32,
        due_epoch_or_zero: i64,
    ) -> ServiceResult<Task> {
        let due_epoch = Task::due_epoch_from_input(due_epoch_or_zero);
        let task = Task::new(title, details, priority, due_epoch);
        task.validate()?;

        self.tasks.create_task(&task)?;

        self.scheduler.insert(task.clone());
        self.history
            .record(format!("Created task: {} ({})", task.title, task.uuid));
        info!(
            "event=task_create module=service status=ok task_id={} priority={}",
            task.uuid, task.priority
        );
        Ok(task)
    }

    /// Persists the assignee field, then reconciles the assignment index
    /// and rebuilds the scheduler from the store.
    ///
    /// Both the task and the employee must already exist; lookup failures
    /// short-circuit with a not-found outcome and no state change.
    pub fn assign_task(&mut self, task_id: TaskId, employee_id: EmployeeId) -> ServiceResult<()> {
        let task = self
            .tasks
            .get_task(task_id)?
            .ok_or(ServiceError::TaskNotFound(task_id))?;
        let employee = self
            .employees
            .get_employee(employee_id)?
            .ok_or(ServiceError::EmployeeNotFound(employee_id))?;

        self.tasks
            .set_assignee(task_id, employee_id)
            .map_err(|err| match err {
                RepoError::NotFound(_) => ServiceError::TaskNotFound(task_id),
                other => other.into(),
            })?;

        self.assignments.assign(employee_id, task_id);
        self.rebuild_scheduler("task_assign")?;
        self.history.record(format!(
            "Assigned task {} ({}) to employee {} ({})",
            task.title, task_id, employee.name, employee_id
        ));
        info!(
            "event=task_assign module=service status=ok task_id={task_id} employee_id={employee_id}"
        );
        Ok(())
    }

    /// Persists completion status and timestamp, then removes the task
    /// from its assignee's list and rebuilds the scheduler.
    pub fn complete_task(&mut self, task_id: TaskId) -> ServiceResult<Task> {
        let task = self
            .tasks
            .get_task(task_id)?
            .ok_or(ServiceError::TaskNotFound(task_id))?;
        let completed_at = now_epoch_ms();

        self.tasks
            .mark_completed(task_id, completed_at)
            .map_err(|err| match err {
                RepoError::NotFound(_) => ServiceError::TaskNotFound(task_id),
                other => other.into(),
            })?;

        if let Some(employee_id) = task.assigned_to {
            self.assignments.unassign_on_complete(employee_id, task_id);
        }
        self.rebuild_scheduler("task_complete")?;
        self.history
            .record(format!("Completed task: {} ({})", task.title, task_id));
        info!("event=task_complete module=service status=ok task_id={task_id}");

        let mut completed = task;
        completed.status = TaskStatus::Completed;
        completed.completed_at = Some(completed_at);
        Ok(completed)
    }

    /// Read-only prefix search; matched employees are re-read from the
    /// store so displayed fields are never stale. Ids missing from the
    /// store are skipped.
    pub fn search_employees(&self, prefix: &str) -> ServiceResult<Vec<Employee>> {
        let mut matches = Vec::new();
        for employee_id in self.prefix.search_prefix(prefix) {
            if let Some(employee) = self.employees.get_employee(employee_id)? {
                matches.push(employee);
            }
        }
        Ok(matches)
    }

    /// Ordered scheduler snapshot: descending priority, then ascending
    /// due time, "no due date" last.
    pub fn scheduled_tasks(&self) -> impl Iterator<Item = &Task> {
        self.scheduler.snapshot_ordered()
    }

    /// Current open-task assignments for the employee; empty if none.
    pub fn assignments_for(&self, employee_id: EmployeeId) -> &[TaskId] {
        self.assignments.list_for(employee_id)
    }

    /// Up to `limit` most recent history entries, newest first.
    pub fn recent_history(&self, limit: usize) -> Vec<HistoryEntry> {
        self.history.recent(limit)
    }

    fn rebuild_scheduler(&mut self, operation: &'static str) -> ServiceResult<()> {
        let snapshot = self.tasks.list_tasks().map_err(|source| {
            error!(
                "event=scheduler_rebuild module=service status=error operation={operation} error={source}"
            );
            ServiceError::IndexDivergence { operation, source }
        })?;
        self.scheduler.rebuild_from(snapshot);
        Ok(())
    }
}
