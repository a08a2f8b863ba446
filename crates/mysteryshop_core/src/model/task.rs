//! Task entity served by the `/tasks` resource.
//!
//! # Invariants
//! - `id` is assigned by storage and strictly increases with creation order.
//! - `title` is stored as received; the resource defines no validation.

use serde::{Deserialize, Serialize};

/// Storage-assigned task identifier.
pub type TaskId = i64;

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
}
