//! User store contract and in-memory implementation.
//!
//! # Invariants
//! - Write paths call `User::validate()` before mutating the map.
//! - `list` returns users in insertion order.

use super::ordered::InsertionOrdered;
use super::{EntityKind, RepoError, RepoResult};
use crate::model::user::{User, UserId, UserPatch};
use std::cell::RefCell;

/// Store interface for user records.
pub trait UserRepository {
    /// Inserts a new user. Fails with `AlreadyExists` when the id is taken.
    fn create(&self, user: User) -> RepoResult<User>;
    fn get(&self, id: UserId) -> Option<User>;
    fn list(&self) -> Vec<User>;
    /// Applies the supplied patch fields. Fails with `NotFound` when absent.
    fn update(&self, id: UserId, patch: &UserPatch) -> RepoResult<User>;
    /// Returns whether a record was removed.
    fn delete(&self, id: UserId) -> bool;

    fn contains(&self, id: UserId) -> bool {
        self.get(id).is_some()
    }
}

impl<R: UserRepository + ?Sized> UserRepository for &R {
    fn create(&self, user: User) -> RepoResult<User> {
        (**self).create(user)
    }

    fn get(&self, id: UserId) -> Option<User> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<User> {
        (**self).list()
    }

    fn update(&self, id: UserId, patch: &UserPatch) -> RepoResult<User> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: UserId) -> bool {
        (**self).delete(id)
    }

    fn contains(&self, id: UserId) -> bool {
        (**self).contains(id)
    }
}

/// Process-local user store.
///
/// Interior mutability keeps the trait `&self`-only; the type is `!Sync`, so
/// it can only serve one logical caller.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RefCell<InsertionOrdered<User>>,
}

impl InMemoryUserRepository {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.users.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl UserRepository for InMemoryUserRepository {
    fn create(&self, user: User) -> RepoResult<User> {
        user.validate()?;
        let mut users = self.users.borrow_mut();
        if users.contains(&user.id) {
            return Err(RepoError::AlreadyExists {
                entity: EntityKind::User,
                id: user.id,
            });
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.users.borrow().get(&id).cloned()
    }

    fn list(&self) -> Vec<User> {
        self.users.borrow().values().cloned().collect()
    }

    fn update(&self, id: UserId, patch: &UserPatch) -> RepoResult<User> {
        let mut users = self.users.borrow_mut();
        let current = users.get(&id).ok_or(RepoError::NotFound {
            entity: EntityKind::User,
            id,
        })?;
        let next = current.patched(patch);
        next.validate()?;
        users.insert(id, next.clone());
        Ok(next)
    }

    fn delete(&self, id: UserId) -> bool {
        self.users.borrow_mut().remove(&id).is_some()
    }

    fn contains(&self, id: UserId) -> bool {
        self.users.borrow().contains(&id)
    }
}
