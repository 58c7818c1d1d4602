//! Task use-case service.
//!
//! # Responsibility
//! - Generate task ids and report missing tasks as `TaskNotFound`.
//! - Own the assignment workflow between tasks and users.
//!
//! # Invariants
//! - Task and user are both validated before `assigned_to` is written, so a
//!   task never gets an assignee that did not exist at assignment time.
//! - A task has at most one assignee; reassignment follows `ReassignPolicy`.
//!   An assignee that no longer exists never blocks reassignment.
//! - Unassigning is idempotent and tolerates a deleted assignee.

use crate::config::ReassignPolicy;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::model::user::UserId;
use crate::repo::task_repo::TaskRepository;
use crate::repo::user_repo::UserRepository;
use crate::service::error::{TrackerError, TrackerResult};
use log::{debug, info, warn};

/// Task service over a task store, reading users for integrity checks.
pub struct TaskService<T: TaskRepository, U: UserRepository> {
    tasks: T,
    users: U,
    policy: ReassignPolicy,
}

impl<T: TaskRepository, U: UserRepository> TaskService<T, U> {
    /// Creates a service with the default `ReassignPolicy::Move`.
    pub fn new(tasks: T, users: U) -> Self {
        Self::with_policy(tasks, users, ReassignPolicy::default())
    }

    /// Creates a service with an explicit reassignment policy.
    pub fn with_policy(tasks: T, users: U, policy: ReassignPolicy) -> Self {
        Self {
            tasks,
            users,
            policy,
        }
    }

    /// Creates an unassigned task with a fresh v4 id.
    pub fn create_task(&self, input: NewTask) -> TrackerResult<Task> {
        let task = self
            .tasks
            .create(Task::new(input))
            .map_err(TrackerError::from)?;
        info!(
            "event=task_create module=task_service status=ok task_id={} status_value={}",
            task.id, task.status
        );
        Ok(task)
    }

    /// Fails with `TaskNotFound` when absent.
    pub fn get_task_by_id(&self, id: TaskId) -> TrackerResult<Task> {
        self.tasks.get(id).ok_or(TrackerError::TaskNotFound(id))
    }

    /// All tasks in creation order.
    pub fn list_tasks(&self) -> Vec<Task> {
        self.tasks.list()
    }

    /// Applies supplied fields only.
    ///
    /// Setting `assigned_to` goes through the same checks as
    /// `assign_task_to_user`: the user must exist and the reassignment
    /// policy applies. An empty patch returns the task without a write.
    pub fn update_task(&self, id: TaskId, patch: &TaskPatch) -> TrackerResult<Task> {
        let task = self.get_task_by_id(id)?;
        if patch.is_empty() {
            debug!(
                "event=task_update module=task_service status=noop task_id={}",
                id
            );
            return Ok(task);
        }
        if let Some(Some(user_id)) = patch.assigned_to {
            self.ensure_user_exists(user_id)?;
            self.ensure_reassignable(&task, user_id)?;
        }

        let updated = self.tasks.update(id, patch).map_err(TrackerError::from)?;
        info!(
            "event=task_update module=task_service status=ok task_id={}",
            id
        );
        Ok(updated)
    }

    /// Deletes a task. The assignee's task list no longer shows it.
    pub fn delete_task(&self, id: TaskId) -> bool {
        let removed = self.tasks.delete(id);
        info!(
            "event=task_delete module=task_service status=ok task_id={} removed={}",
            id, removed
        );
        removed
    }

    /// Assigns `task_id` to `user_id`.
    ///
    /// Assigning to the current assignee returns the task unchanged.
    pub fn assign_task_to_user(&self, task_id: TaskId, user_id: UserId) -> TrackerResult<Task> {
        let task = self.get_task_by_id(task_id)?;
        self.ensure_user_exists(user_id)?;
        if task.assigned_to == Some(user_id) {
            debug!(
                "event=task_assign module=task_service status=noop task_id={} user_id={}",
                task_id, user_id
            );
            return Ok(task);
        }
        self.ensure_reassignable(&task, user_id)?;

        let updated = self
            .tasks
            .update(task_id, &TaskPatch::default().assigned_to(Some(user_id)))
            .map_err(TrackerError::from)?;
        match task.assigned_to {
            Some(previous) => info!(
                "event=task_assign module=task_service status=ok task_id={} user_id={} previous_user_id={}",
                task_id, user_id, previous
            ),
            None => info!(
                "event=task_assign module=task_service status=ok task_id={} user_id={}",
                task_id, user_id
            ),
        }
        Ok(updated)
    }

    /// Clears the assignee of `task_id`. No-op when already unassigned.
    pub fn unassign_task(&self, task_id: TaskId) -> TrackerResult<Task> {
        let task = self.get_task_by_id(task_id)?;
        let Some(previous) = task.assigned_to else {
            return Ok(task);
        };
        if !self.users.contains(previous) {
            debug!(
                "event=task_unassign module=task_service status=dangling task_id={} user_id={}",
                task_id, previous
            );
        }

        let updated = self
            .tasks
            .update(task_id, &TaskPatch::default().assigned_to(None))
            .map_err(TrackerError::from)?;
        info!(
            "event=task_unassign module=task_service status=ok task_id={} user_id={}",
            task_id, previous
        );
        Ok(updated)
    }

    /// Tasks currently assigned to `user_id`, in task store order.
    pub fn get_tasks_by_user_id(&self, user_id: UserId) -> TrackerResult<Vec<Task>> {
        self.ensure_user_exists(user_id)?;
        Ok(self.tasks.list_by_assignee(user_id))
    }

    fn ensure_user_exists(&self, user_id: UserId) -> TrackerResult<()> {
        if self.users.contains(user_id) {
            Ok(())
        } else {
            Err(TrackerError::UserNotFound(user_id))
        }
    }

    fn ensure_reassignable(&self, task: &Task, user_id: UserId) -> TrackerResult<()> {
        match (task.assigned_to, self.policy) {
            (Some(current), ReassignPolicy::Reject)
                if current != user_id && self.users.contains(current) =>
            {
                warn!(
                    "event=task_assign module=task_service status=rejected task_id={} user_id={} current_user_id={}",
                    task.id, user_id, current
                );
                Err(TrackerError::AlreadyAssigned {
                    task_id: task.id,
                    assignee: current,
                })
            }
            _ => Ok(()),
        }
    }
}
