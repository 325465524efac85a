//! Logs page controller: the user's role picks the log scope.

mod common;

use common::{log_json, valid_token, TestBackend, TEST_EMAIL, TEST_USER_ID};
use serde_json::json;
use video_frontend::pages::LogsPage;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

async fn mount_user(backend: &TestBackend, role: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/api/users/user/{}", TEST_USER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": 42, "email": TEST_EMAIL, "username": "viewer", "role": role}
        })))
        .mount(&backend.server)
        .await;
}

fn logs_json(count: usize) -> serde_json::Value {
    json!({ "logs": (0..count).map(log_json).collect::<Vec<_>>() })
}

/// Test: admins get the system-wide log.
#[tokio::test]
async fn admin_sees_all_logs() {
    let backend = TestBackend::start().await;
    mount_user(&backend, "admin").await;
    Mock::given(method("GET"))
        .and(path("/api/logs/all"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(logs_json(100)))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/logs/user/{}", TEST_USER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(logs_json(1)))
        .expect(0)
        .mount(&backend.server)
        .await;

    let page = LogsPage::new(backend.context(Some(valid_token())));
    page.load().await.unwrap();

    let state = page.snapshot().await;
    assert!(state.is_admin);
    assert_eq!(state.logs.len(), 100);
    assert!(state.has_next());
    assert!(!state.has_previous());
}

/// Test: regular users only get their own entries, second page included.
#[tokio::test]
async fn regular_user_sees_own_logs() {
    let backend = TestBackend::start().await;
    mount_user(&backend, "user").await;
    Mock::given(method("GET"))
        .and(path(format!("/api/logs/user/{}", TEST_USER_ID)))
        .and(query_param("start", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(logs_json(7)))
        .expect(1)
        .mount(&backend.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/logs/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(logs_json(1)))
        .expect(0)
        .mount(&backend.server)
        .await;

    let page = LogsPage::new(backend.context(Some(valid_token())));
    page.open(1).await.unwrap();

    let state = page.snapshot().await;
    assert!(!state.is_admin);
    assert_eq!(state.logs.len(), 7);
    assert!(!state.has_next());
    assert!(state.has_previous());
    assert_eq!(state.page_number(), 2);
}
