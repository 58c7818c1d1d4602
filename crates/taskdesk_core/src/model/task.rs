//! Task domain model.
//!
//! # Responsibility
//! - Define the stored `Task` record, its status lifecycle and patch shape.
//!
//! # Invariants
//! - `id` is never nil and never reused for another task.
//! - `status` defaults to `TaskStatus::Todo`.
//! - `assigned_to` holds at most one user id and is the single source of
//!   truth for assignment.

use crate::model::user::UserId;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Created but not started.
    #[default]
    Todo,
    /// Work is in progress.
    InProgress,
    /// Finished.
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a `TaskStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTaskStatusError(pub String);

impl Display for ParseTaskStatusError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown task status `{}`; expected TODO|IN_PROGRESS|COMPLETED",
            self.0
        )
    }
}

impl Error for ParseTaskStatusError {}

impl FromStr for TaskStatus {
    type Err = ParseTaskStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(ParseTaskStatusError(value.to_string())),
        }
    }
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
        }
    }
}

impl Error for TaskValidationError {}

/// Stored task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub assigned_to: Option<UserId>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Builds a task from creation input with a freshly generated id.
    pub fn new(input: NewTask) -> Self {
        Self::build(Uuid::new_v4(), input)
    }

    /// Builds a task from creation input with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(id: TaskId, input: NewTask) -> Result<Self, TaskValidationError> {
        if id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        Ok(Self::build(id, input))
    }

    /// Checks field-level invariants. Titles are free text, empty included.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        Ok(())
    }

    fn build(id: TaskId, input: NewTask) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            status: input.status,
            assigned_to: None,
            due_date: input.due_date,
        }
    }

    /// Returns a copy with `patch` applied. `self` is left untouched.
    pub fn patched(&self, patch: &TaskPatch) -> Self {
        let mut next = self.clone();
        if let Some(title) = &patch.title {
            next.title = title.clone();
        }
        if let Some(description) = &patch.description {
            next.description = description.clone();
        }
        if let Some(status) = patch.status {
            next.status = status;
        }
        if let Some(due_date) = patch.due_date {
            next.due_date = due_date;
        }
        if let Some(assigned_to) = patch.assigned_to {
            next.assigned_to = assigned_to;
        }
        next
    }
}

/// Creation input for a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Input with `TaskStatus::Todo` and no due date.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: TaskStatus::default(),
            due_date: None,
        }
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Partial update for a task.
///
/// Outer `None` means "not provided". For the nullable fields `due_date` and
/// `assigned_to`, `Some(None)` clears the value. In JSON an absent key is
/// "not provided" and an explicit `null` clears.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_to: Option<Option<UserId>>,
}

impl TaskPatch {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn assigned_to(mut self, assigned_to: Option<UserId>) -> Self {
        self.assigned_to = Some(assigned_to);
        self
    }

    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.due_date.is_none()
            && self.assigned_to.is_none()
    }
}

fn present_or_null<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
