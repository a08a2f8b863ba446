//! User directory records shown on the administration pages.
//!
//! Records are read-only here; invitation delivery and authentication live
//! outside core.

use serde::{Deserialize, Serialize};

/// Access profile of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Defines checklists and manages users.
    Administrator,
    /// Reads consolidated reports.
    Supervisor,
    /// Fills out response forms while posing as a customer.
    MysteryShopper,
}

/// One entry of the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub active: bool,
    /// Free-form `YYYY-MM-DD HH:MM` timestamp of the last access.
    pub last_access: Option<String>,
    /// Number of checklists assigned to this user.
    pub assigned_checklists: u32,
}
