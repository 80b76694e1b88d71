//! Core domain logic for TeamOps.
//!
//! The persistent store owns all records; the `index` layer holds derived
//! in-memory structures kept consistent by the `service` layer's
//! persist-then-reconcile orchestration.

pub mod db;
pub mod index;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use index::assignment::AssignmentIndex;
pub use index::history::{HistoryEntry, HistoryLog, DEFAULT_HISTORY_CAP};
pub use index::prefix::{PrefixIndex, MAX_PREFIX_RESULTS};
pub use index::scheduler::TaskScheduler;
pub use logging::{default_log_level, init_logging};
pub use model::employee::{Employee, EmployeeId};
pub use model::project::{Project, ProjectId};
pub use model::task::{
    Task, TaskId, TaskStatus, DUE_EPOCH_NONE, TASK_PRIORITY_MAX, TASK_PRIORITY_MIN,
};
pub use model::ValidationError;
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository};
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::team_service::{ServiceError, ServiceResult, TeamService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
