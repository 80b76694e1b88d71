use teamops_core::{Employee, Project, Task, TaskStatus, DUE_EPOCH_NONE};

#[test]
fn task_serialization_uses_expected_wire_fields() {
    let task = Task::new("Fix bug", "crash on login", 3, DUE_EPOCH_NONE);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["uuid"], task.uuid.to_string());
    assert_eq!(json["title"], "Fix bug");
    assert_eq!(json["details"], "crash on login");
    assert_eq!(json["priority"], 3);
    assert_eq!(json["due_epoch"], i64::MAX);
    assert_eq!(json["assigned_to"], serde_json::Value::Null);
    assert_eq!(json["status"], "OPEN");
    assert_eq!(json["completed_at"], serde_json::Value::Null);

    let decoded: Task = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn completed_status_serializes_as_completed() {
    let mut task = Task::new("Deploy", "", 5, 1_700_000_000);
    task.status = TaskStatus::Completed;
    task.completed_at = Some(1_800_000_000_000);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["status"], "COMPLETED");
    assert_eq!(json["completed_at"], 1_800_000_000_000_i64);
}

#[test]
fn employee_and_project_roundtrip_through_json() {
    let employee = Employee::new("Alice Smith", "alice@example.com");
    let json = serde_json::to_value(&employee).unwrap();
    assert_eq!(json["uuid"], employee.uuid.to_string());
    assert_eq!(json["name"], "Alice Smith");
    let decoded: Employee = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, employee);

    let project = Project::new("Website", "marketing refresh");
    let json = serde_json::to_value(&project).unwrap();
    assert_eq!(json["description"], "marketing refresh");
    let decoded: Project = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, project);
}
