use std::cell::Cell;
use taskdesk_core::{
    EntityKind, InMemoryTaskRepository, InMemoryUserRepository, NewTask, RepoResult, TaskTracker,
    TrackerConfig, TrackerError, User, UserId, UserPatch, UserRepository,
};

/// User store that counts writes and can be told to report id collisions.
#[derive(Default)]
struct RecordingUserRepository {
    inner: InMemoryUserRepository,
    creates: Cell<usize>,
    collide: Cell<bool>,
}

impl UserRepository for RecordingUserRepository {
    fn create(&self, user: User) -> RepoResult<User> {
        self.creates.set(self.creates.get() + 1);
        if self.collide.get() {
            // Simulates a uuid collision by inserting the same id twice.
            self.inner.create(user.clone())?;
        }
        self.inner.create(user)
    }

    fn get(&self, id: UserId) -> Option<User> {
        self.inner.get(id)
    }

    fn list(&self) -> Vec<User> {
        self.inner.list()
    }

    fn update(&self, id: UserId, patch: &UserPatch) -> RepoResult<User> {
        self.inner.update(id, patch)
    }

    fn delete(&self, id: UserId) -> bool {
        self.inner.delete(id)
    }
}

#[test]
fn injected_user_store_receives_facade_calls() {
    let users = RecordingUserRepository::default();
    let tracker = TaskTracker::with_repositories(
        &users,
        InMemoryTaskRepository::new(),
        TrackerConfig::default(),
    );

    tracker.create_user("Ana", "a@x.com").unwrap();
    tracker.create_user("Ben", "b@x.com").unwrap();

    assert_eq!(users.creates.get(), 2);
    assert_eq!(users.inner.len(), 2);
    assert_eq!(tracker.list_users().len(), 2);
}

#[test]
fn id_collision_surfaces_as_already_exists() {
    let users = RecordingUserRepository::default();
    users.collide.set(true);
    let tracker = TaskTracker::with_repositories(
        &users,
        InMemoryTaskRepository::new(),
        TrackerConfig::default(),
    );

    let err = tracker.create_user("Ana", "a@x.com").unwrap_err();
    assert!(matches!(
        err,
        TrackerError::AlreadyExists {
            entity: EntityKind::User,
            ..
        }
    ));
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn separate_trackers_do_not_share_state() {
    let first = TaskTracker::new();
    let second = TaskTracker::new();
    first.create_task(NewTask::new("only here", "")).unwrap();

    assert_eq!(first.list_tasks().len(), 1);
    assert!(second.list_tasks().is_empty());
}

#[test]
fn stores_stay_inspectable_when_lent_to_tracker() {
    let users = InMemoryUserRepository::new();
    let tasks = InMemoryTaskRepository::new();
    {
        let tracker = TaskTracker::with_repositories(&users, &tasks, TrackerConfig::default());
        let user = tracker.create_user("Ana", "a@x.com").unwrap();
        let task = tracker.create_task(NewTask::new("Fix bug", "desc")).unwrap();
        tracker.assign_task_to_user(task.id, user.id).unwrap();
    }

    assert_eq!(users.len(), 1);
    assert_eq!(tasks.len(), 1);
    let listed = users.list();
    let user = &listed[0];
    assert_eq!(
        taskdesk_core::TaskRepository::list_by_assignee(&tasks, user.id).len(),
        1
    );
}
