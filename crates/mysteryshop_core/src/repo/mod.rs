//! Repository layer for persisted resources.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Keep SQL inside the persistence boundary.

pub mod task_repo;
