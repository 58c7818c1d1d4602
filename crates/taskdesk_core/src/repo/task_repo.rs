//! Task store contract and in-memory implementation.
//!
//! # Responsibility
//! - Own task records and the assignee index derived from them.
//!
//! # Invariants
//! - For every task `t`: `t.assigned_to == Some(u)` iff `t.id` is in
//!   `by_assignee[u]`. Every write path (create, update, delete) keeps the
//!   index in sync.
//! - `list` and `list_by_assignee` return tasks in insertion order.
//! - The store does not check that an assignee exists; that is service work.

use super::ordered::InsertionOrdered;
use super::{EntityKind, RepoError, RepoResult};
use crate::model::task::{Task, TaskId, TaskPatch};
use crate::model::user::UserId;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

/// Store interface for task records.
pub trait TaskRepository {
    /// Inserts a new task. Fails with `InvalidTask` for a nil id and with
    /// `AlreadyExists` when the id is taken.
    fn create(&self, task: Task) -> RepoResult<Task>;
    fn get(&self, id: TaskId) -> Option<Task>;
    fn list(&self) -> Vec<Task>;
    /// Applies the supplied patch fields. Fails with `NotFound` when absent.
    fn update(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task>;
    /// Returns whether a record was removed.
    fn delete(&self, id: TaskId) -> bool;
    /// Tasks whose `assigned_to` equals `user_id`, in store order.
    fn list_by_assignee(&self, user_id: UserId) -> Vec<Task>;
}

impl<R: TaskRepository + ?Sized> TaskRepository for &R {
    fn create(&self, task: Task) -> RepoResult<Task> {
        (**self).create(task)
    }

    fn get(&self, id: TaskId) -> Option<Task> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Task> {
        (**self).list()
    }

    fn update(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: TaskId) -> bool {
        (**self).delete(id)
    }

    fn list_by_assignee(&self, user_id: UserId) -> Vec<Task> {
        (**self).list_by_assignee(user_id)
    }
}

#[derive(Debug, Default)]
struct TaskTable {
    tasks: InsertionOrdered<Task>,
    by_assignee: HashMap<UserId, BTreeMap<u64, TaskId>>,
}

impl TaskTable {
    fn index_insert(&mut self, user_id: UserId, seq: u64, task_id: TaskId) {
        self.by_assignee
            .entry(user_id)
            .or_default()
            .insert(seq, task_id);
    }

    fn index_remove(&mut self, user_id: UserId, seq: u64) {
        if let Some(entries) = self.by_assignee.get_mut(&user_id) {
            entries.remove(&seq);
            if entries.is_empty() {
                self.by_assignee.remove(&user_id);
            }
        }
    }
}

/// Process-local task store with a secondary index on `assigned_to`.
///
/// Like `InMemoryUserRepository`, this is `!Sync` and serves one logical
/// caller.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    table: RefCell<TaskTable>,
}

impl InMemoryTaskRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.table.borrow().tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TaskRepository for InMemoryTaskRepository {
    fn create(&self, task: Task) -> RepoResult<Task> {
        task.validate()?;
        let mut table = self.table.borrow_mut();
        if table.tasks.contains(&task.id) {
            return Err(RepoError::AlreadyExists {
                entity: EntityKind::Task,
                id: task.id,
            });
        }
        let seq = table.tasks.insert(task.id, task.clone());
        if let Some(user_id) = task.assigned_to {
            table.index_insert(user_id, seq, task.id);
        }
        Ok(task)
    }

    fn get(&self, id: TaskId) -> Option<Task> {
        self.table.borrow().tasks.get(&id).cloned()
    }

    fn list(&self) -> Vec<Task> {
        self.table.borrow().tasks.values().cloned().collect()
    }

    fn update(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<Task> {
        let mut table = self.table.borrow_mut();
        let (seq, current) = match (table.tasks.seq_of(&id), table.tasks.get(&id)) {
            (Some(seq), Some(current)) => (seq, current),
            _ => {
                return Err(RepoError::NotFound {
                    entity: EntityKind::Task,
                    id,
                })
            }
        };
        let previous_assignee = current.assigned_to;
        let next = current.patched(patch);

        if previous_assignee != next.assigned_to {
            if let Some(user_id) = previous_assignee {
                table.index_remove(user_id, seq);
            }
            if let Some(user_id) = next.assigned_to {
                table.index_insert(user_id, seq, id);
            }
        }
        table.tasks.insert(id, next.clone());
        Ok(next)
    }

    fn delete(&self, id: TaskId) -> bool {
        let mut table = self.table.borrow_mut();
        match table.tasks.remove(&id) {
            Some((seq, task)) => {
                if let Some(user_id) = task.assigned_to {
                    table.index_remove(user_id, seq);
                }
                true
            }
            None => false,
        }
    }

    fn list_by_assignee(&self, user_id: UserId) -> Vec<Task> {
        let table = self.table.borrow();
        table
            .by_assignee
            .get(&user_id)
            .map(|entries| {
                entries
                    .values()
                    .filter_map(|task_id| table.tasks.get(task_id).cloned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{InMemoryTaskRepository, TaskRepository};
    use crate::model::task::{NewTask, Task, TaskPatch, TaskStatus, TaskValidationError};
    use crate::repo::{EntityKind, RepoError};
    use uuid::Uuid;

    fn task(title: &str) -> Task {
        Task::new(NewTask::new(title, "desc"))
    }

    #[test]
    fn create_rejects_duplicate_id() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.create(task("a")).unwrap();
        let err = repo.create(created.clone()).unwrap_err();
        assert_eq!(
            err,
            RepoError::AlreadyExists {
                entity: EntityKind::Task,
                id: created.id
            }
        );
    }

    #[test]
    fn create_rejects_nil_id() {
        let repo = InMemoryTaskRepository::new();
        let mut nil = task("nil");
        nil.id = Uuid::nil();

        let err = repo.create(nil).unwrap_err();
        assert_eq!(err, RepoError::InvalidTask(TaskValidationError::NilId));
        assert!(repo.is_empty());
    }

    #[test]
    fn update_missing_returns_not_found() {
        let repo = InMemoryTaskRepository::new();
        let id = Uuid::new_v4();
        let err = repo
            .update(id, &TaskPatch::default().title("nothing"))
            .unwrap_err();
        assert_eq!(
            err,
            RepoError::NotFound {
                entity: EntityKind::Task,
                id
            }
        );
        assert!(repo.is_empty());
    }

    #[test]
    fn list_by_assignee_follows_store_order_not_assignment_order() {
        let repo = InMemoryTaskRepository::new();
        let user = Uuid::new_v4();
        let first = repo.create(task("first")).unwrap();
        let second = repo.create(task("second")).unwrap();
        let third = repo.create(task("third")).unwrap();

        let assign = TaskPatch::default().assigned_to(Some(user));
        repo.update(third.id, &assign).unwrap();
        repo.update(first.id, &assign).unwrap();

        let ids: Vec<_> = repo
            .list_by_assignee(user)
            .into_iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![first.id, third.id]);
        assert!(repo
            .list_by_assignee(user)
            .iter()
            .all(|t| t.id != second.id));
    }

    #[test]
    fn index_tracks_reassignment_and_clearing() {
        let repo = InMemoryTaskRepository::new();
        let (old_user, new_user) = (Uuid::new_v4(), Uuid::new_v4());
        let created = repo.create(task("move me")).unwrap();

        repo.update(created.id, &TaskPatch::default().assigned_to(Some(old_user))).unwrap();
        repo.update(created.id, &TaskPatch::default().assigned_to(Some(new_user))).unwrap();
        assert!(repo.list_by_assignee(old_user).is_empty());
        assert_eq!(repo.list_by_assignee(new_user).len(), 1);

        repo.update(created.id, &TaskPatch::default().assigned_to(None)).unwrap();
        assert!(repo.list_by_assignee(new_user).is_empty());
    }

    #[test]
    fn delete_drops_index_entry() {
        let repo = InMemoryTaskRepository::new();
        let user = Uuid::new_v4();
        let mut assigned = task("assigned");
        assigned.assigned_to = Some(user);
        let created = repo.create(assigned).unwrap();
        assert_eq!(repo.list_by_assignee(user).len(), 1);

        assert!(repo.delete(created.id));
        assert!(!repo.delete(created.id));
        assert!(repo.list_by_assignee(user).is_empty());
        assert!(repo.is_empty());
    }

    #[test]
    fn status_only_patch_leaves_other_fields() {
        let repo = InMemoryTaskRepository::new();
        let created = repo.create(task("keep")).unwrap();
        let updated = repo
            .update(created.id, &TaskPatch::default().status(TaskStatus::Completed))
            .unwrap();
        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, created.title);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.due_date, created.due_date);
    }
}
