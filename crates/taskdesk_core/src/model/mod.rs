//! Domain model for users and tasks.
//!
//! # Responsibility
//! - Define the canonical records owned by the stores.
//! - Define patch shapes for partial updates.
//!
//! # Invariants
//! - Every record is identified by a stable v4 uuid that never changes.
//! - `Task::assigned_to` is the only stored link between tasks and users;
//!   a user's task list is always derived from it.

pub mod task;
pub mod user;
