//! Core domain logic for the mystery-shopper checklist app.
//! This crate owns the document model, its edit and validation rules,
//! the submission pipeline, and the task store.

pub mod catalog;
pub mod db;
pub mod editor;
pub mod form;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;
pub mod submission;
pub mod validation;

pub use catalog::{
    filter_checklists, filter_users, remove_summary, summarize, ChecklistFilter, ChecklistSummary,
    UserFilter,
};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use editor::{CollectionPath, EditError, EditResult, FieldChange};
pub use form::{ChecklistEditor, ResponseForm};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::checklist::{
    Checklist, ChecklistStatus, Moment, MomentId, Pillar, Question, QuestionId,
};
pub use model::response::{Answer, CompletedResponse, Evaluation, ResponseDraft};
pub use model::task::{Task, TaskId};
pub use model::user::{UserRecord, UserRole};
pub use report::{consolidate, ComplianceTally, ConsolidatedReport, ResponseReport};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::task_service::TaskService;
pub use submission::{
    FormSession, GatewayError, Notification, NotificationLevel, SimulatedGateway,
    SubmissionGateway, SubmissionState, SubmitOutcome, SubmitRejected,
};
pub use validation::{validate_checklist, validate_response, ValidationReport, Violation};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
