//! Single entry point over the user and task services.
//!
//! # Responsibility
//! - Own one user store, one task store and the tracker configuration.
//! - Expose every tracker operation behind one object.
//!
//! # Invariants
//! - No business logic lives here; each call builds the service it needs
//!   over borrowed stores and delegates.
//! - Users are returned as `UserRecord`, whose `tasks` are read from the task
//!   store's assignee index at call time.

use crate::config::TrackerConfig;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::model::user::{User, UserId, UserPatch, UserRecord};
use crate::repo::task_repo::{InMemoryTaskRepository, TaskRepository};
use crate::repo::user_repo::{InMemoryUserRepository, UserRepository};
use crate::service::error::TrackerResult;
use crate::service::task_service::TaskService;
use crate::service::user_service::UserService;

/// Task/user tracker facade.
///
/// Stores are injected through `with_repositories`; `new` wires the
/// in-memory defaults.
pub struct TaskTracker<U = InMemoryUserRepository, T = InMemoryTaskRepository>
where
    U: UserRepository,
    T: TaskRepository,
{
    users: U,
    tasks: T,
    config: TrackerConfig,
}

impl TaskTracker {
    /// Tracker over fresh in-memory stores with default configuration.
    pub fn new() -> Self {
        Self::with_config(TrackerConfig::default())
    }

    /// Tracker over fresh in-memory stores.
    pub fn with_config(config: TrackerConfig) -> Self {
        Self::with_repositories(
            InMemoryUserRepository::new(),
            InMemoryTaskRepository::new(),
            config,
        )
    }
}

impl Default for TaskTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: UserRepository, T: TaskRepository> TaskTracker<U, T> {
    /// Tracker over caller-provided stores.
    pub fn with_repositories(users: U, tasks: T, config: TrackerConfig) -> Self {
        Self {
            users,
            tasks,
            config,
        }
    }

    /// Configuration this tracker was built with.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Creates a user with a fresh id.
    pub fn create_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> TrackerResult<UserRecord> {
        let user = self.user_service().create_user(name, email)?;
        Ok(self.project(user))
    }

    /// Fails with `UserNotFound` when absent.
    pub fn get_user(&self, id: UserId) -> TrackerResult<UserRecord> {
        let user = self.user_service().get_user_by_id(id)?;
        Ok(self.project(user))
    }

    /// All users in creation order, each with its current tasks.
    pub fn list_users(&self) -> Vec<UserRecord> {
        self.user_service()
            .list_users()
            .into_iter()
            .map(|user| self.project(user))
            .collect()
    }

    /// Applies supplied fields; the record is unchanged when validation fails.
    pub fn update_user(&self, id: UserId, patch: &UserPatch) -> TrackerResult<UserRecord> {
        let user = self.user_service().update_user(id, patch)?;
        Ok(self.project(user))
    }

    /// Returns whether a user was removed. Its tasks are not touched.
    pub fn delete_user(&self, id: UserId) -> bool {
        self.user_service().delete_user(id)
    }

    /// Creates an unassigned task with a fresh id.
    pub fn create_task(&self, input: NewTask) -> TrackerResult<Task> {
        self.task_service().create_task(input)
    }

    /// Fails with `TaskNotFound` when absent.
    pub fn get_task(&self, id: TaskId) -> TrackerResult<Task> {
        self.task_service().get_task_by_id(id)
    }

    /// All tasks in creation order.
    pub fn list_tasks(&self) -> Vec<Task> {
        self.task_service().list_tasks()
    }

    /// Applies supplied fields. Setting `assigned_to` follows the
    /// reassignment policy.
    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TrackerResult<Task> {
        self.task_service().update_task(id, patch)
    }

    /// Returns whether a task was removed.
    pub fn delete_task(&self, id: TaskId) -> bool {
        self.task_service().delete_task(id)
    }

    /// Assigns a task to an existing user.
    pub fn assign_task_to_user(&self, task_id: TaskId, user_id: UserId) -> TrackerResult<Task> {
        self.task_service().assign_task_to_user(task_id, user_id)
    }

    /// Clears a task's assignee. Idempotent.
    pub fn unassign_task(&self, task_id: TaskId) -> TrackerResult<Task> {
        self.task_service().unassign_task(task_id)
    }

    /// Tasks assigned to an existing user, in task store order.
    pub fn get_user_tasks(&self, user_id: UserId) -> TrackerResult<Vec<Task>> {
        self.task_service().get_tasks_by_user_id(user_id)
    }

    fn user_service(&self) -> UserService<&U> {
        UserService::new(&self.users)
    }

    fn task_service(&self) -> TaskService<&T, &U> {
        TaskService::with_policy(&self.tasks, &self.users, self.config.reassign_policy)
    }

    fn project(&self, user: User) -> UserRecord {
        let tasks = self.tasks.list_by_assignee(user.id);
        UserRecord::new(user, tasks)
    }
}
