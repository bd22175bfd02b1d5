//! Integration tests for the todo CRUD surface
//!
//! Covers ownership isolation between users, ordering, patch
//! semantics, and the end-to-end register → create → complete → delete
//! scenario.
//!
//! Run with: cargo test --features integration

#![cfg(feature = "integration")]

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{unique_username, TestApp};
use serde_json::Value;

fn timestamp(value: &Value, field: &str) -> DateTime<Utc> {
    value[field]
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(|| panic!("missing timestamp field {}", field))
}

async fn create_todo(app: &TestApp, token: &str, title: &str) -> Value {
    let body = format!(r#"{{"title":"{}"}}"#, title);
    let (status, response) = app.post("/api/todos", Some(token), &body).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", response);
    serde_json::from_str(&response).unwrap()
}

#[tokio::test]
async fn list_is_empty_for_new_account() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("empty"), "secret123").await;

    let (status, response) = app.get("/api/todos", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, "[]");
}

#[tokio::test]
async fn created_todo_has_expected_shape() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("shape"), "secret123").await;

    let todo = create_todo(&app, &token, "buy milk").await;

    assert_eq!(todo["title"], "buy milk");
    assert_eq!(todo["completed"], false);
    assert!(todo["id"].as_str().is_some());
    // Fresh todo: created and updated timestamps are equal
    assert_eq!(todo["createdAt"], todo["updatedAt"]);
    // The owner is never serialized
    assert!(todo.get("userId").is_none());
    assert!(todo.get("user_id").is_none());
}

#[tokio::test]
async fn empty_title_rejected_and_nothing_persisted() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("novalid"), "secret123").await;

    for body in [r#"{"title":""}"#, r#"{"title":"   "}"#] {
        let (status, response) = app.post("/api/todos", Some(&token), body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response.contains("VALIDATION_ERROR"));
    }

    let (_, response) = app.get("/api/todos", Some(&token)).await;
    assert_eq!(response, "[]");
}

#[tokio::test]
async fn list_returns_all_items_newest_first() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("order"), "secret123").await;

    for title in ["first", "second", "third"] {
        create_todo(&app, &token, title).await;
    }

    let (status, response) = app.get("/api/todos", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let todos: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert_eq!(todos.len(), 3);
    assert_eq!(todos[0]["title"], "third");
    assert_eq!(todos[1]["title"], "second");
    assert_eq!(todos[2]["title"], "first");
}

#[tokio::test]
async fn patch_applies_only_present_fields() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("patch"), "secret123").await;

    let todo = create_todo(&app, &token, "buy milk").await;
    let id = todo["id"].as_str().unwrap();

    // Completing the todo leaves the title alone
    let (status, response) = app
        .patch(&format!("/api/todos/{}", id), Some(&token), r#"{"completed":true}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(updated["title"], "buy milk");
    assert_eq!(updated["completed"], true);
    assert!(timestamp(&updated, "updatedAt") > timestamp(&updated, "createdAt"));

    // Retitling leaves completion alone
    let (status, response) = app
        .patch(&format!("/api/todos/{}", id), Some(&token), r#"{"title":"buy oat milk"}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(updated["title"], "buy oat milk");
    assert_eq!(updated["completed"], true);
}

#[tokio::test]
async fn patch_with_empty_title_rejected() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("badpatch"), "secret123").await;

    let todo = create_todo(&app, &token, "keep me").await;
    let id = todo["id"].as_str().unwrap();

    let (status, _) = app
        .patch(&format!("/api/todos/{}", id), Some(&token), r#"{"title":"  "}"#)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_the_todo() {
    let app = TestApp::new().await;
    let token = app.register(&unique_username("del"), "secret123").await;

    let todo = create_todo(&app, &token, "ephemeral").await;
    let id = todo["id"].as_str().unwrap();

    let (status, _) = app.delete(&format!("/api/todos/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    // Deleting again: it is gone
    let (status, _) = app.delete(&format!("/api/todos/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_cannot_see_or_touch_each_others_todos() {
    let app = TestApp::new().await;
    let token_a = app.register(&unique_username("usera"), "secret123").await;
    let token_b = app.register(&unique_username("userb"), "secret123").await;

    let todo_a = create_todo(&app, &token_a, "private to a").await;
    let id_a = todo_a["id"].as_str().unwrap();

    // B's list does not contain A's todo
    let (_, response) = app.get("/api/todos", Some(&token_b)).await;
    let todos_b: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert!(todos_b.iter().all(|t| t["id"] != id_a));

    // B updating A's todo by id: indistinguishable from a missing todo
    let (status, body_update) = app
        .patch(&format!("/api/todos/{}", id_a), Some(&token_b), r#"{"completed":true}"#)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // B deleting A's todo: same
    let (status, body_delete) = app
        .delete(&format!("/api/todos/{}", id_a), Some(&token_b))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The foreign-id responses match a genuinely nonexistent id
    let missing = uuid::Uuid::new_v4();
    let (status, body_missing) = app
        .delete(&format!("/api/todos/{}", missing), Some(&token_b))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body_delete, body_missing);
    assert_eq!(body_update, body_missing);

    // A's todo survived untouched
    let (_, response) = app.get("/api/todos", Some(&token_a)).await;
    let todos_a: Vec<Value> = serde_json::from_str(&response).unwrap();
    assert_eq!(todos_a.len(), 1);
    assert_eq!(todos_a[0]["completed"], false);
}

/// The full scenario from the service's acceptance checklist:
/// register → login → create → complete → delete → empty list.
#[tokio::test]
async fn full_lifecycle_scenario() {
    let app = TestApp::new().await;
    let username = unique_username("alice");
    app.register(&username, "secret123").await;

    // Login rather than using the registration token
    let body = format!(r#"{{"username":"{}","password":"secret123"}}"#, username);
    let (status, response) = app.post("/api/auth/login", None, &body).await;
    assert_eq!(status, StatusCode::OK);
    let login: Value = serde_json::from_str(&response).unwrap();
    let token = login["token"].as_str().unwrap().to_string();

    let todo = create_todo(&app, &token, "buy milk").await;
    assert_eq!(todo["title"], "buy milk");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["createdAt"], todo["updatedAt"]);
    let id = todo["id"].as_str().unwrap();

    let (status, response) = app
        .patch(&format!("/api/todos/{}", id), Some(&token), r#"{"completed":true}"#)
        .await;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_str(&response).unwrap();
    assert_eq!(updated["completed"], true);
    assert!(timestamp(&updated, "updatedAt") > timestamp(&updated, "createdAt"));

    let (status, _) = app.delete(&format!("/api/todos/{}", id), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, response) = app.get("/api/todos", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(response, "[]");
}
