//! Form sessions binding documents to the submission pipeline.
//!
//! # Responsibility
//! - `ChecklistEditor`: checklist builder used by administrators.
//! - `ResponseForm`: response form filled by mystery shoppers.
//!
//! # Invariants
//! - Each session owns its document; nothing is shared across sessions.

pub mod checklist_form;
pub mod response_form;

pub use checklist_form::ChecklistEditor;
pub use response_form::ResponseForm;
