//! Store layer: contracts and in-memory implementations.
//!
//! # Responsibility
//! - Own each entity type's id → record map exclusively.
//! - Keep listing order stable (insertion order).
//!
//! # Invariants
//! - Reads signal absence with `None`, never with an error.
//! - Writes fail with `AlreadyExists` / `NotFound` before mutating anything.
//! - User writes must pass `User::validate()`; task creates must pass
//!   `Task::validate()`.

use crate::model::task::TaskValidationError;
use crate::model::user::UserValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

mod ordered;
pub mod task_repo;
pub mod user_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Entity type named in store errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Task,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Task => f.write_str("task"),
        }
    }
}

/// Store-level error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    Validation(UserValidationError),
    InvalidTask(TaskValidationError),
    AlreadyExists { entity: EntityKind, id: Uuid },
    NotFound { entity: EntityKind, id: Uuid },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::InvalidTask(err) => write!(f, "{err}"),
            Self::AlreadyExists { entity, id } => write!(f, "{entity} already exists: {id}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::InvalidTask(err) => Some(err),
            Self::AlreadyExists { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<UserValidationError> for RepoError {
    fn from(value: UserValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::InvalidTask(value)
    }
}
