//! User domain model.
//!
//! # Responsibility
//! - Define the stored `User` record and its read projection `UserRecord`.
//! - Validate user fields before they reach a store.
//!
//! # Invariants
//! - `id` is never nil and never reused for another user.
//! - `name` is not blank; `email` has a `local@domain.tld` shape.
//! - `User` carries no task list; `UserRecord::tasks` is computed from
//!   `Task::assigned_to` at read time.

use crate::model::task::Task;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex")
});

/// Stable identifier of a user.
pub type UserId = Uuid;

/// Validation failures for user records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    NilId,
    BlankName,
    InvalidEmail(String),
}

impl Display for UserValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "user id must not be nil"),
            Self::BlankName => write!(f, "user name must not be blank"),
            Self::InvalidEmail(value) => write!(f, "invalid email address: `{value}`"),
        }
    }
}

impl Error for UserValidationError {}

/// Stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl User {
    /// Creates a user with a freshly generated id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            email: email.into(),
        }
    }

    /// Creates a user with a caller-provided id.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: UserId,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, UserValidationError> {
        if id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        Ok(Self {
            id,
            name: name.into(),
            email: email.into(),
        })
    }

    /// Checks field-level invariants.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.id.is_nil() {
            return Err(UserValidationError::NilId);
        }
        if self.name.trim().is_empty() {
            return Err(UserValidationError::BlankName);
        }
        if !EMAIL_RE.is_match(self.email.as_str()) {
            return Err(UserValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    /// Returns a copy with `patch` applied. `self` is left untouched.
    pub fn patched(&self, patch: &UserPatch) -> Self {
        let mut next = self.clone();
        if let Some(name) = &patch.name {
            next.name = name.clone();
        }
        if let Some(email) = &patch.email {
            next.email = email.clone();
        }
        next
    }
}

/// Partial update for a user.
///
/// `None` leaves the field unchanged; `Some` replaces it, empty strings
/// included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// User as seen by callers: the stored record plus its assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Tasks whose `assigned_to` is this user, in task store order.
    pub tasks: Vec<Task>,
}

impl UserRecord {
    /// Joins a stored user with its assigned tasks.
    pub fn new(user: User, tasks: Vec<Task>) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            tasks,
        }
    }
}
