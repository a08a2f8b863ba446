//! Domain model for checklists, responses, users and tasks.
//!
//! # Responsibility
//! - Define the data shapes shared by editor, validator, reports and storage.
//! - Keep wire naming (`snake_case`) stable across serde boundaries.
//!
//! # Invariants
//! - Every moment and question is identified by a stable `Uuid`.
//! - Parent-child containment is the only relation between entities.

pub mod checklist;
pub mod response;
pub mod task;
pub mod user;
