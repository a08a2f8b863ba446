use assert_cmd::Command;
use predicates::str::contains;
use std::path::Path;

fn cmd(db: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mysteryshop").unwrap();
    cmd.env_remove("MYSTERYSHOP_LOG_DIR")
        .env("MYSTERYSHOP_SUBMIT_DELAY_MS", "0")
        .arg("--db")
        .arg(db);
    cmd
}

#[test]
fn ping_prints_pong() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir.path().join("tasks.sqlite3"))
        .arg("ping")
        .assert()
        .success()
        .stdout(contains("\"pong\""));
}

#[test]
fn added_tasks_are_listed() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tasks.sqlite3");

    cmd(&db)
        .args(["tasks", "add", "Visitar Loja Centro"])
        .assert()
        .success()
        .stdout(contains("Visitar Loja Centro"));
    cmd(&db)
        .args(["tasks", "list"])
        .assert()
        .success()
        .stdout(contains("\"id\": 1"))
        .stdout(contains("Visitar Loja Centro"));
}

#[test]
fn checklist_demo_submits_and_failure_keeps_idle() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tasks.sqlite3");

    cmd(&db)
        .args(["checklist", "demo"])
        .assert()
        .success()
        .stdout(contains("\"state\": \"submitted\""))
        .stdout(contains("Checklist created successfully"));
    cmd(&db)
        .args(["checklist", "demo", "--fail"])
        .assert()
        .success()
        .stdout(contains("\"ok\": false"))
        .stdout(contains("simulated outage"));
}

#[test]
fn short_checklist_name_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir.path().join("tasks.sqlite3"))
        .args(["checklist", "demo", "--name", "AB"])
        .assert()
        .success()
        .stdout(contains("name too short: minimum 3 characters"));
}

#[test]
fn report_demo_prints_consolidated_numbers() {
    let dir = tempfile::tempdir().unwrap();
    cmd(&dir.path().join("tasks.sqlite3"))
        .args(["report", "demo"])
        .assert()
        .success()
        .stdout(contains("\"overall_percentage\": 71"));
}

#[test]
fn database_path_falls_back_to_environment() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("from-env.sqlite3");

    Command::cargo_bin("mysteryshop")
        .unwrap()
        .env_remove("MYSTERYSHOP_LOG_DIR")
        .env("MYSTERYSHOP_DB_PATH", &db)
        .args(["tasks", "add", "Auditar Loja Norte"])
        .assert()
        .success();
    assert!(db.exists());
    cmd(&db)
        .args(["tasks", "list"])
        .assert()
        .success()
        .stdout(contains("Auditar Loja Norte"));
}

#[test]
fn invalid_environment_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("mysteryshop")
        .unwrap()
        .env("MYSTERYSHOP_SUBMIT_DELAY_MS", "soon")
        .arg("--db")
        .arg(dir.path().join("tasks.sqlite3"))
        .arg("ping")
        .assert()
        .failure()
        .stderr(contains("MYSTERYSHOP_SUBMIT_DELAY_MS"));
}
