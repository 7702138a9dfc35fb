//! End-to-end CLI flows against a mock API server.

use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::tempdir;
use wiremock::matchers::{body_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seed_session(home: &Path, session: &Value) {
    fs::write(home.join("session.json"), session.to_string()).unwrap();
}

fn read_session(home: &Path) -> Value {
    let contents = fs::read_to_string(home.join("session.json")).unwrap();
    serde_json::from_str(&contents).unwrap()
}

fn habitrack(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("habitrack");
    cmd.env("HABITRACK_HOME", home)
        .env("HABITRACK_API_BASE_URL", server.uri())
        .env_remove("HABITRACK_PASSWORD");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_stores_token_and_points() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "alice", "password": "password1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-token-value-1234567890",
            "user": {"id": 1, "username": "alice", "points": 21}
        })))
        .expect(1)
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["login", "-u", "alice"])
        .write_stdin("password1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice (21 points)"));

    let session = read_session(home.path());
    assert_eq!(session["jwt_token"], "jwt-token-value-1234567890");
    assert_eq!(session["username"], "alice");
    assert_eq!(session["user_points"], "21");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejection_shows_server_error() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "user not found"})))
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["login", "-u", "ghost", "--password", "password1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("user not found"));

    assert!(!home.path().join("session.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_signup_validates_locally() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["signup", "-u", "averylongname", "--password", "password1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 10 characters"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_today_lists_track() {
    let home = tempdir().unwrap();
    seed_session(home.path(), &json!({"jwt_token": "tok", "user_points": "10"}));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/auth/daily_track/\d{4}-\d{2}-\d{2}$"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "user_id": 1,
            "date": "2024-05-01",
            "habit_statuses": [
                {"habit_id": 1, "habit_name": "Read", "is_done": true},
                {"habit_id": 2, "habit_name": "Run", "is_done": false}
            ]
        })))
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .arg("today")
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"))
        .stdout(predicate::str::contains("Run"))
        .stdout(predicate::str::contains("1 remaining · 10 points"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_done_last_habit_awards_bonus() {
    let home = tempdir().unwrap();
    seed_session(home.path(), &json!({"jwt_token": "tok", "user_points": "10"}));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/auth/daily_track/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "user_id": 1,
            "date": "2024-05-01",
            "habit_statuses": [
                {"habit_id": 1, "habit_name": "Read", "is_done": true},
                {"habit_id": 2, "habit_name": "Run", "is_done": false}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/daily_track/done"))
        .and(body_json(json!({"date": "2024-05-01", "habit_id": "2"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["done", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("+8 points (18 total)"))
        .stdout(predicate::str::contains("All habits done for today!"));

    assert_eq!(read_session(home.path())["user_points"], "18");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_done_already_done_skips_network() {
    let home = tempdir().unwrap();
    seed_session(home.path(), &json!({"jwt_token": "tok", "user_points": "10"}));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/auth/daily_track/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "user_id": 1,
            "date": "2024-05-01",
            "habit_statuses": [{"habit_id": 1, "habit_name": "Read", "is_done": true}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["done", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already done"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_expired_session_clears_credentials() {
    let home = tempdir().unwrap();
    seed_session(
        home.path(),
        &json!({"jwt_token": "stale", "username": "alice", "user_points": "10"}),
    );
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/auth/habit/list"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "token expired"})))
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["habits", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Session expired. Please log in again."));

    let session = read_session(home.path());
    assert!(session.get("jwt_token").is_none());
    assert!(session.get("username").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_token_never_calls_server() {
    let home = tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Session expired"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_habits_add_refuses_at_limit() {
    let home = tempdir().unwrap();
    seed_session(home.path(), &json!({"jwt_token": "tok"}));
    let server = MockServer::start().await;
    let habits: Vec<Value> = (1..=5)
        .map(|i| json!({"id": i, "user_id": 1, "name": format!("H{i}")}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/auth/habit/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(habits))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    habitrack(home.path(), &server)
        .args(["habits", "add", "Swim"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("up to 5 habits"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_logout_clears_everything() {
    let home = tempdir().unwrap();
    seed_session(
        home.path(),
        &json!({"jwt_token": "tok", "username": "alice", "user_points": "10"}),
    );
    let server = MockServer::start().await;

    habitrack(home.path(), &server)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert_eq!(read_session(home.path()), json!({}));
}
