use teamops_core::db::open_db_in_memory;
use teamops_core::{
    Employee, EmployeeRepository, Project, ProjectRepository, RepoError, SqliteEmployeeRepository,
    SqliteProjectRepository, SqliteTaskRepository, Task, TaskRepository, TaskStatus,
    DUE_EPOCH_NONE,
};
use uuid::Uuid;

#[test]
fn employee_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let employee = Employee::new("Alice Smith", "alice@example.com");
    let id = repo.create_employee(&employee).unwrap();

    let loaded = repo.get_employee(id).unwrap().unwrap();
    assert_eq!(loaded, employee);
}

#[test]
fn employee_list_preserves_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let alice = Employee::new("Alice Smith", "alice@example.com");
    let bob = Employee::new("Bob Jones", "bob@example.com");
    repo.create_employee(&alice).unwrap();
    repo.create_employee(&bob).unwrap();

    let listed = repo.list_employees().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].uuid, alice.uuid);
    assert_eq!(listed[1].uuid, bob.uuid);
}

#[test]
fn invalid_employee_is_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    let employee = Employee::new("Alice Smith", "not-an-email");
    let err = repo.create_employee(&employee).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_employees().unwrap().is_empty());
}

#[test]
fn missing_employee_reads_as_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEmployeeRepository::new(&conn);

    assert!(repo.get_employee(Uuid::new_v4()).unwrap().is_none());
}

#[test]
fn project_create_and_list_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::new(&conn);

    let project = Project::new("Website", "marketing refresh");
    repo.create_project(&project).unwrap();

    let listed = repo.list_projects().unwrap();
    assert_eq!(listed, vec![project]);
}

#[test]
fn task_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Fix bug", "crash on login", 3, DUE_EPOCH_NONE);
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task);
    assert_eq!(loaded.due_epoch, DUE_EPOCH_NONE);
    assert_eq!(loaded.assigned_to, None);
    assert_eq!(loaded.status, TaskStatus::Open);
}

#[test]
fn set_assignee_persists_the_reference() {
    let conn = open_db_in_memory().unwrap();
    let employees = SqliteEmployeeRepository::new(&conn);
    let tasks = SqliteTaskRepository::new(&conn);

    let employee = Employee::new("Alice Smith", "alice@example.com");
    employees.create_employee(&employee).unwrap();
    let task = Task::new("Fix bug", "", 3, 1_700_000_000);
    tasks.create_task(&task).unwrap();

    tasks.set_assignee(task.uuid, employee.uuid).unwrap();

    let loaded = tasks.get_task(task.uuid).unwrap().unwrap();
    assert_eq!(loaded.assigned_to, Some(employee.uuid));
    assert_eq!(loaded.status, TaskStatus::Open);
}

#[test]
fn mark_completed_persists_status_and_timestamp() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::new("Deploy", "release 1.2", 5, 1_700_000_000);
    repo.create_task(&task).unwrap();
    repo.mark_completed(task.uuid, 1_800_000_000_000).unwrap();

    let loaded = repo.get_task(task.uuid).unwrap().unwrap();
    assert_eq!(loaded.status, TaskStatus::Completed);
    assert_eq!(loaded.completed_at, Some(1_800_000_000_000));
}

#[test]
fn updates_on_missing_task_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let missing = Uuid::new_v4();

    let err = repo.set_assignee(missing, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));

    let err = repo.mark_completed(missing, 1).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn task_list_returns_full_snapshot_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let first = Task::new("first", "", 1, DUE_EPOCH_NONE);
    let second = Task::new("second", "", 5, 100);
    repo.create_task(&first).unwrap();
    repo.create_task(&second).unwrap();
    repo.mark_completed(first.uuid, 7).unwrap();

    let listed = repo.list_tasks().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].uuid, first.uuid);
    assert_eq!(listed[0].status, TaskStatus::Completed);
    assert_eq!(listed[1].uuid, second.uuid);
}
