//! Interactive command surface for TeamOps.
//!
//! # Responsibility
//! - Drive the core service through a numbered menu on stdin/stdout.
//! - Keep parsing and display formatting out of the core crate.
//!
//! # Invariants
//! - Malformed input is reported before any store call is attempted.
//! - Operation failures are printed and the menu continues; only setup
//!   failures terminate the process.

use std::io::{self, BufRead, Lines, StdinLock, Write};
use teamops_core::db::open_db;
use teamops_core::{
    core_version, default_log_level, init_logging, Employee, SqliteEmployeeRepository,
    SqliteProjectRepository, SqliteTaskRepository, Task, TaskStatus, TeamService, DUE_EPOCH_NONE,
};
use uuid::Uuid;

const DEFAULT_DB_PATH: &str = "teamops.sqlite3";
const DEFAULT_HISTORY_LIMIT: usize = 20;

type CliService<'conn> = TeamService<
    SqliteEmployeeRepository<'conn>,
    SqliteTaskRepository<'conn>,
    SqliteProjectRepository<'conn>,
>;

type Input<'a> = Lines<StdinLock<'a>>;

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    if let Ok(log_dir) = std::env::var("TEAMOPS_LOG_DIR") {
        if let Err(err) = init_logging(default_log_level(), &log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let db_path = std::env::var("TEAMOPS_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
    let conn = open_db(&db_path)?;
    let mut service = TeamService::load(
        SqliteEmployeeRepository::new(&conn),
        SqliteTaskRepository::new(&conn),
        SqliteProjectRepository::new(&conn),
    )?;

    println!("TeamOps v{} (db: {db_path})", core_version());

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    loop {
        print_menu();
        let Some(choice) = prompt(&mut input, "Enter choice: ")? else {
            break;
        };
        match choice.as_str() {
            "1" => add_employee(&mut service, &mut input)?,
            "2" => list_employees(&service),
            "3" => create_project(&mut service, &mut input)?,
            "4" => list_projects(&service),
            "5" => create_task(&mut service, &mut input)?,
            "6" => assign_task(&mut service, &mut input)?,
            "7" => list_tasks(&service),
            "8" => complete_task(&mut service, &mut input)?,
            "9" => search_employees(&service, &mut input)?,
            "10" => show_history(&service, &mut input)?,
            "11" => resync_indexes(&mut service),
            "0" => break,
            other => println!("Unknown choice: {other}"),
        }
    }

    println!("Goodbye.");
    Ok(())
}

fn print_menu() {
    println!();
    println!("=== TeamOps ===");
    println!(" 1) Add employee");
    println!(" 2) List employees");
    println!(" 3) Create project");
    println!(" 4) List projects");
    println!(" 5) Create task");
    println!(" 6) Assign task to employee");
    println!(" 7) List tasks");
    println!(" 8) Mark task complete");
    println!(" 9) Search employee by name prefix");
    println!("10) Show recent history");
    println!("11) Resync indexes from store");
    println!(" 0) Exit");
}

/// Prints the prompt and reads one trimmed line; `None` means end of
/// input.
fn prompt(input: &mut Input<'_>, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match input.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn add_employee(service: &mut CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(name) = prompt(input, "Name: ")? else {
        return Ok(());
    };
    let Some(email) = prompt(input, "Email: ")? else {
        return Ok(());
    };

    match service.add_employee(name, email) {
        Ok(employee) => println!("Employee added with id: {}", employee.uuid),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn list_employees(service: &CliService<'_>) {
    match service.list_employees() {
        Ok(employees) if employees.is_empty() => println!("No employees yet."),
        Ok(employees) => {
            println!("Employees:");
            for employee in &employees {
                println!("{}", employee_row(employee));
            }
        }
        Err(err) => println!("{err}"),
    }
}

fn create_project(service: &mut CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(name) = prompt(input, "Project name: ")? else {
        return Ok(());
    };
    let Some(description) = prompt(input, "Description: ")? else {
        return Ok(());
    };

    match service.create_project(name, description) {
        Ok(project) => println!("Project created with id: {}", project.uuid),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn list_projects(service: &CliService<'_>) {
    match service.list_projects() {
        Ok(projects) if projects.is_empty() => println!("No projects yet."),
        Ok(projects) => {
            println!("Projects:");
            for project in &projects {
                println!(
                    "{} | {} | {} | created_at={}",
                    project.uuid, project.name, project.description, project.created_at
                );
            }
        }
        Err(err) => println!("{err}"),
    }
}

fn create_task(service: &mut CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(title) = prompt(input, "Title: ")? else {
        return Ok(());
    };
    let Some(details) = prompt(input, "Details: ")? else {
        return Ok(());
    };
    let Some(priority_text) = prompt(input, "Priority (1 low - 5 high): ")? else {
        return Ok(());
    };
    let Ok(priority) = priority_text.parse::<i32>() else {
        println!("Invalid priority: `{priority_text}`");
        return Ok(());
    };
    let Some(due_text) = prompt(input, "Due date epoch seconds (0 for none): ")? else {
        return Ok(());
    };
    let Ok(due_epoch_or_zero) = due_text.parse::<i64>() else {
        println!("Invalid due date: `{due_text}`");
        return Ok(());
    };

    match service.create_task(title, details, priority, due_epoch_or_zero) {
        Ok(task) => println!("Task created with id: {}", task.uuid),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn assign_task(service: &mut CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(task_id) = prompt_uuid(input, "Task id: ")? else {
        return Ok(());
    };
    let Some(employee_id) = prompt_uuid(input, "Employee id: ")? else {
        return Ok(());
    };

    match service.assign_task(task_id, employee_id) {
        Ok(()) => println!("Assigned task."),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn list_tasks(service: &CliService<'_>) {
    let mut shown = false;
    println!("Tasks:");
    for task in service.scheduled_tasks() {
        println!("{}", task_row(task));
        shown = true;
    }
    if !shown {
        println!("No tasks yet.");
    }
}

fn complete_task(service: &mut CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(task_id) = prompt_uuid(input, "Task id: ")? else {
        return Ok(());
    };

    match service.complete_task(task_id) {
        Ok(task) => println!("Marked complete: {}", task.title),
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn search_employees(service: &CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(prefix) = prompt(input, "Name prefix: ")? else {
        return Ok(());
    };

    match service.search_employees(&prefix) {
        Ok(matches) if matches.is_empty() => println!("No employees found with that prefix."),
        Ok(matches) => {
            println!("Matches:");
            for employee in &matches {
                println!("{}", employee_row(employee));
            }
        }
        Err(err) => println!("{err}"),
    }
    Ok(())
}

fn show_history(service: &CliService<'_>, input: &mut Input<'_>) -> io::Result<()> {
    let Some(limit_text) = prompt(input, "Limit (default 20): ")? else {
        return Ok(());
    };
    let limit = if limit_text.is_empty() {
        DEFAULT_HISTORY_LIMIT
    } else {
        match limit_text.parse::<usize>() {
            Ok(limit) => limit,
            Err(_) => {
                println!("Invalid limit: `{limit_text}`");
                return Ok(());
            }
        }
    };

    let entries = service.recent_history(limit);
    if entries.is_empty() {
        println!("No history yet.");
        return Ok(());
    }
    println!("Recent history (latest first):");
    for entry in &entries {
        println!("{} - {}", entry.at_epoch_ms, entry.description);
    }
    Ok(())
}

fn resync_indexes(service: &mut CliService<'_>) {
    match service.resync_indexes() {
        Ok(()) => println!("Indexes resynced from store."),
        Err(err) => println!("{err}"),
    }
}

fn prompt_uuid(input: &mut Input<'_>, label: &str) -> io::Result<Option<Uuid>> {
    let Some(text) = prompt(input, label)? else {
        return Ok(None);
    };
    match Uuid::parse_str(&text) {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            println!("Invalid id: `{text}`");
            Ok(None)
        }
    }
}

fn employee_row(employee: &Employee) -> String {
    format!(
        "{} | {} | {} | created_at={}",
        employee.uuid, employee.name, employee.email, employee.created_at
    )
}

fn task_row(task: &Task) -> String {
    let due = if task.due_epoch == DUE_EPOCH_NONE {
        "none".to_string()
    } else {
        task.due_epoch.to_string()
    };
    let assignee = task
        .assigned_to
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{} | {} | pr={} | due={} | assignee={} | status={}",
        task.uuid,
        task.title,
        task.priority,
        due,
        assignee,
        status_label(task.status)
    )
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Open => "OPEN",
        TaskStatus::Completed => "COMPLETED",
    }
}
