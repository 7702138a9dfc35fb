use std::sync::Arc;

use habitrack_core::api::ApiClient;
use habitrack_core::guard::Guarded;
use habitrack_core::storage::{MemoryStorage, Storage, StorageKey};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::events::{AuthUiEvent, HabitsUiEvent, LoggedIn, TodayUiEvent, UiEvent};

fn services(server: &MockServer, token: Option<&str>) -> Services {
    let storage: Arc<dyn Storage> = match token {
        Some(t) => Arc::new(MemoryStorage::with_token(t)),
        None => Arc::new(MemoryStorage::new()),
    };
    Services::new(ApiClient::new(server.uri(), storage))
}

#[tokio::test]
async fn test_login_stores_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({"username": "alice", "password": "password1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "jwt-abcdefghijklmnopqrstuvwxyz",
            "user": {"id": "u1", "username": "alice", "points": 12}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let services = services(&server, None);
    let event = login(services.clone(), "alice".into(), "password1".into()).await;

    match event {
        UiEvent::Auth(AuthUiEvent::LoginFinished(Ok(logged_in))) => assert_eq!(
            logged_in,
            LoggedIn {
                username: "alice".to_string(),
                points: 12
            }
        ),
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(
        services.storage.token().as_deref(),
        Some("jwt-abcdefghijklmnopqrstuvwxyz")
    );
    assert_eq!(
        services.storage.get(StorageKey::UserPoints).as_deref(),
        Some("12")
    );
}

#[tokio::test]
async fn test_login_rejection_carries_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "password mismatch"})))
        .mount(&server)
        .await;

    let services = services(&server, None);
    let event = login(services.clone(), "alice".into(), "wrong".into()).await;

    match event {
        UiEvent::Auth(AuthUiEvent::LoginFinished(Err(message))) => {
            assert_eq!(message, "password mismatch");
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert!(services.storage.token().is_none());
}

#[tokio::test]
async fn test_expired_token_is_cleared_on_track_load() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "token expired"})))
        .mount(&server)
        .await;

    let services = services(&server, Some("stale"));
    let event = load_today_track(services.clone()).await;

    assert!(matches!(
        event,
        UiEvent::Today(TodayUiEvent::TrackLoaded(Guarded::AuthFailed { .. }))
    ));
    assert!(services.storage.token().is_none());
}

#[tokio::test]
async fn test_mark_done_posts_date_and_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/daily_track/done"))
        .and(body_json(json!({"date": "2024-05-01", "habit_id": "h1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let event = mark_done(
        services(&server, Some("tok")),
        "2024-05-01".into(),
        "h1".into(),
    )
    .await;

    match event {
        UiEvent::Today(TodayUiEvent::MarkDoneFinished { habit_id, result }) => {
            assert_eq!(habit_id, "h1");
            assert_eq!(result, Guarded::Ok(()));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_register_habit_returns_server_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/habit/register"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "message": "ok"})))
        .mount(&server)
        .await;

    let event = register_habit(services(&server, Some("tok")), "Read".into()).await;

    match event {
        UiEvent::Habits(HabitsUiEvent::Registered { name, result }) => {
            assert_eq!(name, "Read");
            assert_eq!(result, Guarded::Ok("7".to_string()));
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn test_delete_failure_is_not_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/auth/habit/h1/delete"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "db down"})))
        .mount(&server)
        .await;

    let services = services(&server, Some("tok"));
    let event = delete_habit(services.clone(), "h1".into()).await;

    match event {
        UiEvent::Habits(HabitsUiEvent::Deleted { result, .. }) => {
            assert!(matches!(result, Guarded::Failed(_)));
        }
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(services.storage.token().as_deref(), Some("tok"));
}
