//! Use-case API for front-end facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions over the core crate.
//! - Convert every failure into an envelope with `ok=false` and a message.
//!
//! # Invariants
//! - Exported functions never panic.
//! - Task calls take the database path explicitly; callers resolve it from
//!   [`ApiConfig`].

use crate::config::ApiConfig;
use log::warn;
use mysteryshop_core::submission::SubmittableDocument;
use mysteryshop_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, open_db,
    ping as ping_inner, ChecklistEditor, FormSession, LoggingConfig, ResponseForm,
    SimulatedGateway, SqliteTaskRepository, SubmissionGateway, SubmissionState, SubmitOutcome,
    SubmitRejected, Task, TaskService, Violation,
};
use serde::Serialize;
use std::path::Path;

/// Health check.
pub fn ping() -> String {
    ping_inner().to_owned()
}

pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
pub fn init_logging(level: &str, log_dir: &str) -> String {
    match init_logging_inner(&LoggingConfig::new(level, log_dir)) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Envelope for `GET /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskListResponse {
    pub ok: bool,
    pub items: Vec<Task>,
    pub message: String,
}

/// Envelope for `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskActionResponse {
    pub ok: bool,
    pub task: Option<Task>,
    pub message: String,
}

impl TaskActionResponse {
    fn success(task: Task) -> Self {
        Self {
            ok: true,
            task: Some(task),
            message: "Task created.".to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task: None,
            message: message.into(),
        }
    }
}

/// Lists tasks stored at `db_path`, oldest first.
pub fn list_tasks_at(db_path: &Path) -> TaskListResponse {
    let listed = with_task_service(db_path, |service| {
        service.find_all().map_err(|err| err.to_string())
    });
    match listed {
        Ok(items) => TaskListResponse {
            ok: true,
            message: format!("Found {} task(s).", items.len()),
            items,
        },
        Err(err) => TaskListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("tasks_list failed: {err}"),
        },
    }
}

/// Creates a task at `db_path`; the title is stored as given.
pub fn create_task_at(db_path: &Path, title: &str) -> TaskActionResponse {
    let created = with_task_service(db_path, |service| {
        service.create(title).map_err(|err| err.to_string())
    });
    match created {
        Ok(task) => TaskActionResponse::success(task),
        Err(err) => TaskActionResponse::failure(format!("tasks_create failed: {err}")),
    }
}

/// Envelope describing one submit attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
    pub state: SubmissionState,
    /// Gateway receipt reference on success.
    pub reference: Option<String>,
    pub violations: Vec<Violation>,
    pub message: String,
}

/// Submits the checklist open in `editor` through the simulated gateway.
pub fn submit_checklist(editor: &mut ChecklistEditor, config: &ApiConfig) -> SubmitResponse {
    submit_form(editor, &SimulatedGateway::new(config.submit_delay))
}

/// Submits the response open in `form` through the simulated gateway.
pub fn submit_response(form: &mut ResponseForm, config: &ApiConfig) -> SubmitResponse {
    submit_form(form, &SimulatedGateway::new(config.submit_delay))
}

/// Runs one submission and folds the outcome plus drained notifications into an envelope.
pub fn submit_form<D: SubmittableDocument>(
    session: &mut FormSession<D>,
    gateway: &dyn SubmissionGateway,
) -> SubmitResponse {
    let outcome = session.submit(gateway);
    let notice = session
        .take_notifications()
        .into_iter()
        .last()
        .map(|notification| notification.message);

    let (ok, reference, message) = match outcome {
        SubmitOutcome::Submitted(receipt) => (
            true,
            Some(receipt.reference.to_string()),
            notice.unwrap_or_default(),
        ),
        SubmitOutcome::Failed(err) => (false, None, notice.unwrap_or_else(|| err.to_string())),
        SubmitOutcome::Rejected(SubmitRejected::Invalid(report)) => (
            false,
            None,
            format!("Please fix the highlighted fields: {}", report.summary()),
        ),
        SubmitOutcome::Rejected(rejected) => {
            warn!("event=submit_api module=api status=rejected reason={rejected}");
            (false, None, rejected.to_string())
        }
    };

    SubmitResponse {
        ok,
        state: session.state(),
        reference,
        violations: session.violations().violations().to_vec(),
        message,
    }
}

fn with_task_service<T>(
    db_path: &Path,
    f: impl FnOnce(&TaskService<SqliteTaskRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let conn = open_db(db_path).map_err(|err| format!("task DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&conn)
        .map_err(|err| format!("task repo init failed: {err}"))?;
    let service = TaskService::new(repo);
    f(&service)
}
