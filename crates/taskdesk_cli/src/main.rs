//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskdesk_core` linkage and default wiring.
//! - Run a short fixed scenario and print the resulting records as JSON.

use std::error::Error;
use std::process::ExitCode;
use taskdesk_core::{NewTask, TaskPatch, TaskStatus, TaskTracker, TrackerConfig};

fn main() -> ExitCode {
    println!("taskdesk_core ping={}", taskdesk_core::ping());
    println!("taskdesk_core version={}", taskdesk_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = TrackerConfig::from_env()?;
    if let Err(err) = taskdesk_core::init_logging(&config.log) {
        eprintln!("warning: logging disabled: {err}");
    }

    let tracker = TaskTracker::with_config(config);
    log::info!(
        "event=cli_start module=cli status=ok reassign_policy={}",
        tracker.config().reassign_policy.as_str()
    );

    let melissa = tracker.create_user("Melissa", "melissa@example.com")?;
    let tracy = tracker.create_user("Tracy", "tracy@yopmail.com")?;

    let integrate = tracker.create_task(
        NewTask::new(
            "Implementation of a management system",
            "Help integrate the new management system into the existing application",
        )
        .due_date(chrono_date(2023, 12, 31)?),
    )?;
    let schema = tracker.create_task(
        NewTask::new("Design Database", "Design database schema for the application")
            .status(TaskStatus::Completed)
            .due_date(chrono_date(2026, 1, 21)?),
    )?;

    tracker.assign_task_to_user(integrate.id, melissa.id)?;
    tracker.assign_task_to_user(schema.id, tracy.id)?;
    print_json("tasks for Melissa", &tracker.get_user_tasks(melissa.id)?)?;

    let updated = tracker.update_task(
        integrate.id,
        &TaskPatch::default()
            .status(TaskStatus::InProgress)
            .description("Also includes training of the end-users"),
    )?;
    print_json("updated task", &updated)?;

    tracker.unassign_task(integrate.id)?;
    print_json("users", &tracker.list_users())?;
    print_json("tasks", &tracker.list_tasks())?;
    Ok(())
}

fn chrono_date(year: i32, month: u32, day: u32) -> Result<taskdesk_core::NaiveDate, String> {
    taskdesk_core::NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("invalid date {year}-{month}-{day}"))
}

fn print_json<T: serde::Serialize>(label: &str, value: &T) -> Result<(), serde_json::Error> {
    println!("{label}:");
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
