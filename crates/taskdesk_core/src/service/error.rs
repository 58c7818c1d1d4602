//! Error type shared by the tracker services.

use crate::model::task::{TaskId, TaskValidationError};
use crate::model::user::{UserId, UserValidationError};
use crate::repo::{EntityKind, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Errors surfaced to tracker callers.
///
/// Every variant is meant to be shown to a user as-is; none is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// Id collision on create.
    AlreadyExists { entity: EntityKind, id: Uuid },
    /// Referenced user does not exist.
    UserNotFound(UserId),
    /// Referenced task does not exist.
    TaskNotFound(TaskId),
    /// Task is assigned to someone else and the reassignment policy rejects
    /// moving it.
    AlreadyAssigned { task_id: TaskId, assignee: UserId },
    /// User fields failed validation.
    InvalidUser(UserValidationError),
    /// Task fields failed validation.
    InvalidTask(TaskValidationError),
}

impl TrackerError {
    /// Stable short code for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AlreadyExists { .. } => "already_exists",
            Self::UserNotFound(_) => "user_not_found",
            Self::TaskNotFound(_) => "task_not_found",
            Self::AlreadyAssigned { .. } => "already_assigned",
            Self::InvalidUser(_) => "invalid_user",
            Self::InvalidTask(_) => "invalid_task",
        }
    }
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlreadyExists { entity, id } => write!(f, "{entity} with ID {id} already exists"),
            Self::UserNotFound(id) => write!(f, "user with ID {id} not found"),
            Self::TaskNotFound(id) => write!(f, "task with ID {id} not found"),
            Self::AlreadyAssigned { task_id, assignee } => write!(
                f,
                "task {task_id} is already assigned to user {assignee}; unassign it first"
            ),
            Self::InvalidUser(err) => write!(f, "{err}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TrackerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidUser(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for TrackerError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidUser(err),
            RepoError::InvalidTask(err) => Self::InvalidTask(err),
            RepoError::AlreadyExists { entity, id } => Self::AlreadyExists { entity, id },
            RepoError::NotFound {
                entity: EntityKind::User,
                id,
            } => Self::UserNotFound(id),
            RepoError::NotFound {
                entity: EntityKind::Task,
                id,
            } => Self::TaskNotFound(id),
        }
    }
}

impl From<UserValidationError> for TrackerError {
    fn from(value: UserValidationError) -> Self {
        Self::InvalidUser(value)
    }
}
