//! User use-case service.
//!
//! # Responsibility
//! - Generate user ids and validate user input.
//! - Report missing users as `TrackerError::UserNotFound`.
//!
//! # Invariants
//! - Deleting a user never touches tasks; their `assigned_to` dangles.

use crate::model::user::{User, UserId, UserPatch};
use crate::repo::user_repo::UserRepository;
use crate::service::error::{TrackerError, TrackerResult};
use log::{info, warn};

/// User service over a user store.
pub struct UserService<U: UserRepository> {
    users: U,
}

impl<U: UserRepository> UserService<U> {
    /// Creates a service over `users`.
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Creates a user with a fresh v4 id and no assigned tasks.
    ///
    /// `AlreadyExists` is only possible on a real uuid collision.
    pub fn create_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> TrackerResult<User> {
        let user = User::new(name, email);
        match self.users.create(user) {
            Ok(user) => {
                info!(
                    "event=user_create module=user_service status=ok user_id={}",
                    user.id
                );
                Ok(user)
            }
            Err(err) => {
                let err = TrackerError::from(err);
                warn!(
                    "event=user_create module=user_service status=error error_code={}",
                    err.code()
                );
                Err(err)
            }
        }
    }

    /// Fails with `UserNotFound` when absent.
    pub fn get_user_by_id(&self, id: UserId) -> TrackerResult<User> {
        self.users.get(id).ok_or(TrackerError::UserNotFound(id))
    }

    /// All users in creation order.
    pub fn list_users(&self) -> Vec<User> {
        self.users.list()
    }

    /// Applies supplied fields only; explicit empty strings are applied too
    /// and then rejected by validation.
    pub fn update_user(&self, id: UserId, patch: &UserPatch) -> TrackerResult<User> {
        let updated = self.users.update(id, patch).map_err(|err| {
            let err = TrackerError::from(err);
            warn!(
                "event=user_update module=user_service status=error user_id={} error_code={}",
                id,
                err.code()
            );
            err
        })?;
        info!(
            "event=user_update module=user_service status=ok user_id={}",
            id
        );
        Ok(updated)
    }

    /// Deletes a user. Tasks assigned to it keep the dangling id.
    pub fn delete_user(&self, id: UserId) -> bool {
        let removed = self.users.delete(id);
        info!(
            "event=user_delete module=user_service status=ok user_id={} removed={}",
            id, removed
        );
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::UserService;
    use crate::model::user::{UserPatch, UserValidationError};
    use crate::repo::user_repo::InMemoryUserRepository;
    use crate::service::error::TrackerError;
    use uuid::Uuid;

    #[test]
    fn create_then_get_returns_matching_fields() {
        let service = UserService::new(InMemoryUserRepository::new());
        let created = service.create_user("Ana", "a@x.com").unwrap();

        let loaded = service.get_user_by_id(created.id).unwrap();
        assert_eq!(loaded.name, "Ana");
        assert_eq!(loaded.email, "a@x.com");
        assert!(!loaded.id.is_nil());
    }

    #[test]
    fn get_missing_user_is_not_found() {
        let service = UserService::new(InMemoryUserRepository::new());
        let id = Uuid::new_v4();
        assert_eq!(
            service.get_user_by_id(id).unwrap_err(),
            TrackerError::UserNotFound(id)
        );
    }

    #[test]
    fn create_rejects_invalid_email() {
        let service = UserService::new(InMemoryUserRepository::new());
        let err = service.create_user("Ana", "ana").unwrap_err();
        assert_eq!(
            err,
            TrackerError::InvalidUser(UserValidationError::InvalidEmail("ana".to_string()))
        );
        assert!(service.list_users().is_empty());
    }

    #[test]
    fn update_missing_user_is_not_found() {
        let service = UserService::new(InMemoryUserRepository::new());
        let id = Uuid::new_v4();
        let err = service
            .update_user(id, &UserPatch::default().name("Tracy"))
            .unwrap_err();
        assert_eq!(err, TrackerError::UserNotFound(id));
    }

    #[test]
    fn delete_passes_through_boolean() {
        let service = UserService::new(InMemoryUserRepository::new());
        let user = service.create_user("Tracy", "tracy@yopmail.com").unwrap();
        assert!(service.delete_user(user.id));
        assert!(!service.delete_user(user.id));
    }
}
