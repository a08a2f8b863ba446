//! Request dispatch for the `/tasks` resource.
//!
//! # Responsibility
//! - Map `(method, path, body)` onto the task use-cases.
//! - Produce a status code and a JSON body for every request.
//!
//! # Invariants
//! - `GET /tasks` answers `200` with a JSON array ordered by id.
//! - `POST /tasks` answers `201` with the created task.
//! - Malformed bodies answer `400`, unknown paths `404`, other methods on
//!   `/tasks` answer `405`, storage failures `500`.

use crate::api::{create_task_at, list_tasks_at};
use crate::config::ApiConfig;
use log::{info, warn};
use serde::Deserialize;
use serde_json::{json, Value};

const TASKS_PATH: &str = "/tasks";
const TASKS_ALLOW: &str = "GET, POST";

/// Status plus JSON body of one dispatched request.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub status: u16,
    pub body: Value,
}

impl RouteResponse {
    fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Self::new(status, json!({ "error": message.into() }))
    }
}

#[derive(Debug, Deserialize)]
struct CreateTaskBody {
    title: String,
}

/// Dispatches one request against the task store configured in `config`.
///
/// `path` may carry a query string and a trailing slash; both are ignored.
pub fn dispatch(config: &ApiConfig, method: &str, path: &str, body: &str) -> RouteResponse {
    let route = normalize_path(path);
    let method = method.trim().to_ascii_uppercase();

    let response = if route != TASKS_PATH {
        RouteResponse::error(404, format!("no route for `{route}`"))
    } else {
        match method.as_str() {
            "GET" => list(config),
            "POST" => create(config, body),
            other => RouteResponse::error(
                405,
                format!("method `{other}` not allowed; expected {TASKS_ALLOW}"),
            ),
        }
    };

    if response.status >= 500 {
        warn!(
            "event=route_dispatch module=api status={} method={method} path={route}",
            response.status
        );
    } else {
        info!(
            "event=route_dispatch module=api status={} method={method} path={route}",
            response.status
        );
    }
    response
}

fn list(config: &ApiConfig) -> RouteResponse {
    let listed = list_tasks_at(&config.db_path);
    if !listed.ok {
        return RouteResponse::error(500, listed.message);
    }
    match serde_json::to_value(listed.items) {
        Ok(items) => RouteResponse::new(200, items),
        Err(err) => RouteResponse::error(500, err.to_string()),
    }
}

fn create(config: &ApiConfig, body: &str) -> RouteResponse {
    let request: CreateTaskBody = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(err) => return RouteResponse::error(400, format!("invalid task body: {err}")),
    };

    let created = create_task_at(&config.db_path, &request.title);
    match created.task {
        Some(task) if created.ok => match serde_json::to_value(task) {
            Ok(task) => RouteResponse::new(201, task),
            Err(err) => RouteResponse::error(500, err.to_string()),
        },
        _ => RouteResponse::error(500, created.message),
    }
}

fn normalize_path(path: &str) -> &str {
    let without_query = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = without_query.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
