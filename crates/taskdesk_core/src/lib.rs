//! Core domain logic for taskdesk, an in-memory task/user tracker.
//! This crate is the single source of truth for assignment invariants.

pub mod config;
pub mod facade;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use chrono::NaiveDate;
pub use config::{ConfigError, LogConfig, ReassignPolicy, TrackerConfig};
pub use facade::TaskTracker;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    NewTask, ParseTaskStatusError, Task, TaskId, TaskPatch, TaskStatus, TaskValidationError,
};
pub use model::user::{User, UserId, UserPatch, UserRecord, UserValidationError};
pub use repo::task_repo::{InMemoryTaskRepository, TaskRepository};
pub use repo::user_repo::{InMemoryUserRepository, UserRepository};
pub use repo::{EntityKind, RepoError, RepoResult};
pub use service::error::{TrackerError, TrackerResult};
pub use service::task_service::TaskService;
pub use service::user_service::UserService;

/// Minimal health-check API.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
