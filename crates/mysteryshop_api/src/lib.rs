//! Use-case facade over `mysteryshop_core`: task endpoints, submission
//! entry points and environment configuration.

pub mod api;
pub mod config;
pub mod routes;

pub use api::{
    core_version, create_task_at, init_logging, list_tasks_at, ping, submit_checklist,
    submit_form, submit_response, SubmitResponse, TaskActionResponse, TaskListResponse,
};
pub use config::{ApiConfig, ConfigError};
pub use routes::{dispatch, RouteResponse};
