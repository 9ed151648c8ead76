//! End-to-end tests of the `/api/tasks` router.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use rstest::rstest;
use serde_json::{json, Value};
use tasklist_core::{InMemoryTaskRepository, SharedRepository, Task, TaskRepository};
use tasklist_server::{router, AppState};
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    router(AppState::new(Arc::new(InMemoryTaskRepository::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

struct BrokenStore;

impl TaskRepository for BrokenStore {
    fn create(&self, _task: Task) -> Result<Task> { Err(anyhow!("store unavailable")) }
    fn list(&self) -> Result<Vec<Task>> { Err(anyhow!("store unavailable")) }
    fn find(&self, _id: &Uuid) -> Result<Option<Task>> { Err(anyhow!("store unavailable")) }
    fn save(&self, _task: &Task) -> Result<Task> { Err(anyhow!("store unavailable")) }
    fn toggle(&self, _id: &Uuid) -> Result<Option<Task>> { Err(anyhow!("store unavailable")) }
    fn delete(&self, _id: &Uuid) -> Result<bool> { Err(anyhow!("store unavailable")) }
}

#[tokio::test]
async fn test_buy_milk_scenario() {
    let app = app();

    let (status, created) = send(&app, Method::POST, "/api/tasks", Some(json!({ "text": "Buy milk" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["text"], "Buy milk");
    assert_eq!(created["completed"], false);
    assert!(created["createdAt"].is_string());
    let id = created["id"].as_str().unwrap().to_string();

    let (status, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["text"], "Buy milk");

    let (status, toggled) = send(&app, Method::PUT, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["completed"], true);
    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed[0]["completed"], true);

    let (_, toggled) = send(&app, Method::PUT, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(toggled["completed"], false);
    assert_eq!(toggled["version"], 2);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, json!({ "message": "Task deleted" }));

    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = app();
    for text in ["first", "second", "third"] {
        send(&app, Method::POST, "/api/tasks/", Some(json!({ "text": text }))).await;
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let (_, listed) = send(&app, Method::GET, "/api/tasks/", None).await;
    let texts: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|task| task["text"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_create_accepts_empty_text() {
    let (status, created) = send(&app(), Method::POST, "/api/tasks", Some(json!({ "text": "" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["text"], "");
}

#[tokio::test]
async fn test_create_without_text_is_rejected() {
    let (status, _) = send(&app(), Method::POST, "/api/tasks", Some(json!({ "title": "wrong field" }))).await;
    assert!(status.is_client_error());
}

#[rstest]
#[case("00000000-0000-4000-8000-000000000000")]
#[case("not-a-uuid")]
#[tokio::test]
async fn test_toggle_unknown_id_is_404(#[case] id: &str) {
    let (status, body) = send(&app(), Method::PUT, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Task not found" }));
}

#[rstest]
#[case("00000000-0000-4000-8000-000000000000")]
#[case("not-a-uuid")]
#[tokio::test]
async fn test_delete_unknown_id_still_confirms(#[case] id: &str) {
    let app = app();
    send(&app, Method::POST, "/api/tasks", Some(json!({ "text": "survivor" }))).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Task deleted" }));

    let (_, listed) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_store_failure_is_500_with_message() {
    let repository: SharedRepository = Arc::new(BrokenStore);
    let app = router(AppState::new(repository));

    let (status, body) = send(&app, Method::POST, "/api/tasks", Some(json!({ "text": "x" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "message": "store unavailable" }));

    let (status, body) = send(&app, Method::GET, "/api/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "store unavailable");
}

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_file_store_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    let repository: SharedRepository =
        Arc::new(tasklist_core::FileTaskRepository::open(Some(path.clone())).unwrap());
    let app = router(AppState::new(repository));

    let (_, created) = send(&app, Method::POST, "/api/tasks", Some(json!({ "text": "on disk" }))).await;

    let raw = std::fs::read_to_string(path).unwrap();
    assert!(raw.contains("on disk"));
    assert!(raw.contains(created["id"].as_str().unwrap()));
}
