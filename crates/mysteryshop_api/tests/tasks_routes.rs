use mysteryshop_api::{dispatch, ApiConfig};
use serde_json::json;
use tempfile::TempDir;

fn config() -> (TempDir, ApiConfig) {
    let dir = tempfile::tempdir().unwrap();
    let config = ApiConfig {
        db_path: dir.path().join("tasks.sqlite3"),
        ..ApiConfig::default()
    };
    (dir, config)
}

#[test]
fn get_on_empty_store_returns_empty_array() {
    let (_dir, config) = config();

    let response = dispatch(&config, "GET", "/tasks", "");
    assert_eq!(response.status, 200);
    assert_eq!(response.body, json!([]));
}

#[test]
fn post_then_get_returns_tasks_in_creation_order() {
    let (_dir, config) = config();

    let first = dispatch(&config, "POST", "/tasks", r#"{"title":"Visitar Loja Centro"}"#);
    assert_eq!(first.status, 201);
    assert_eq!(first.body["title"], "Visitar Loja Centro");
    let second = dispatch(&config, "post", "/tasks/", r#"{"title":"Revisar Drive Thru"}"#);
    assert_eq!(second.status, 201);

    let listed = dispatch(&config, "GET", "/tasks?order=id", "");
    assert_eq!(listed.status, 200);
    assert_eq!(listed.body, json!([first.body, second.body]));
}

#[test]
fn malformed_body_is_bad_request() {
    let (_dir, config) = config();

    for body in ["", "not json", r#"{"name":"x"}"#, r#"{"title":42}"#] {
        let response = dispatch(&config, "POST", "/tasks", body);
        assert_eq!(response.status, 400, "body {body:?}");
        assert!(response.body["error"].is_string());
    }
    assert_eq!(dispatch(&config, "GET", "/tasks", "").body, json!([]));
}

#[test]
fn unknown_route_and_method_are_rejected() {
    let (_dir, config) = config();

    assert_eq!(dispatch(&config, "GET", "/checklists", "").status, 404);
    assert_eq!(dispatch(&config, "GET", "/tasks/1", "").status, 404);
    assert_eq!(dispatch(&config, "DELETE", "/tasks", "").status, 405);
}
