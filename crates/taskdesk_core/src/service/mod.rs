//! Tracker use-case services.
//!
//! # Responsibility
//! - Turn store-level absence into reportable `TrackerError`s.
//! - Enforce referential integrity between tasks and users.
//!
//! # Invariants
//! - Every operation validates all inputs before the first write.

pub mod error;
pub mod task_service;
pub mod user_service;
