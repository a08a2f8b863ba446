//! List projections and search filters for checklist and user pages.
//!
//! Filters are single-pass and keep input order. The search term matches
//! case-insensitively; a blank term matches everything. Deleting a row is
//! simulated on the in-memory list, like every other catalog change.

use crate::model::checklist::{Checklist, ChecklistStatus};
use crate::model::user::{UserRecord, UserRole};
use crate::submission::{Notification, NotificationLevel};
use log::info;
use serde::{Deserialize, Serialize};

/// Row of the checklist list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistSummary {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub status: Option<ChecklistStatus>,
    pub moment_count: usize,
    pub question_count: usize,
    /// `YYYY-MM-DD` of the last update.
    pub updated_on: String,
}

/// Derives the list row of `checklist`.
pub fn summarize(
    id: u32,
    checklist: &Checklist,
    updated_on: impl Into<String>,
) -> ChecklistSummary {
    ChecklistSummary {
        id,
        name: checklist.name.clone(),
        description: checklist.description.clone(),
        status: checklist.status,
        moment_count: checklist.moments.len(),
        question_count: checklist.question_count(),
        updated_on: updated_on.into(),
    }
}

/// Checklist list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChecklistFilter {
    /// Matched against name and description.
    pub term: String,
    pub status: Option<ChecklistStatus>,
}

/// User list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Matched against name and e-mail.
    pub term: String,
    pub role: Option<UserRole>,
    pub active_only: bool,
}

pub fn filter_checklists<'a>(
    items: &'a [ChecklistSummary],
    filter: &ChecklistFilter,
) -> Vec<&'a ChecklistSummary> {
    let needle = normalize_term(&filter.term);
    items
        .iter()
        .filter(|item| filter.status.map_or(true, |status| item.status == Some(status)))
        .filter(|item| matches_any(&needle, &[item.name.as_str(), item.description.as_str()]))
        .collect()
}

pub fn filter_users<'a>(items: &'a [UserRecord], filter: &UserFilter) -> Vec<&'a UserRecord> {
    let needle = normalize_term(&filter.term);
    items
        .iter()
        .filter(|user| filter.role.map_or(true, |role| user.role == role))
        .filter(|user| !filter.active_only || user.active)
        .filter(|user| matches_any(&needle, &[user.name.as_str(), user.email.as_str()]))
        .collect()
}

/// Removes the checklist row `id`, returning the remaining rows plus the
/// confirmation notice. `None` when no row has that id; `items` is never touched.
pub fn remove_summary(
    items: &[ChecklistSummary],
    id: u32,
) -> Option<(Vec<ChecklistSummary>, Notification)> {
    let removed = items.iter().find(|item| item.id == id)?;
    let notice = Notification {
        level: NotificationLevel::Success,
        title: "Checklist deleted".to_string(),
        message: format!(
            "The checklist \"{}\" was deleted successfully.",
            removed.name
        ),
    };
    let remaining = items.iter().filter(|item| item.id != id).cloned().collect();
    info!("event=checklist_delete module=catalog status=ok checklist_id={id}");
    Some((remaining, notice))
}

fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}

fn matches_any(needle: &str, haystacks: &[&str]) -> bool {
    needle.is_empty()
        || haystacks
            .iter()
            .any(|haystack| haystack.to_lowercase().contains(needle))
}
