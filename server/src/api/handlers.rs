use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Serialize;
use tasklist_core::{
    CreateTaskRequest, MessageResponse, ServiceResult, SharedRepository, TaskDto, TaskService,
    DELETE_CONFIRMATION,
};
use uuid::Uuid;

use super::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Runs a store-backed service call off the async workers.
async fn with_service<T, F>(state: &AppState, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&TaskService<SharedRepository>) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || call(&service)).await?;
    Ok(result?)
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `POST /api/tasks`
pub async fn create_task(
    State(state): State<AppState>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskDto>), ApiError> {
    let created = with_service(&state, move |service| service.create_task(request.text)).await?;
    tracing::info!(id = %created.id, "created task");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/tasks`, newest first.
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<TaskDto>>, ApiError> {
    let tasks = with_service(&state, |service| service.list_tasks()).await?;
    Ok(Json(tasks))
}

/// `PUT /api/tasks/{id}` inverts `completed`.
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TaskDto>, ApiError> {
    // A malformed id cannot name a stored task.
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound)?;
    let toggled = with_service(&state, move |service| service.toggle_task(&id)).await?;
    tracing::info!(%id, completed = toggled.completed, "toggled task");
    Ok(Json(toggled))
}

/// `DELETE /api/tasks/{id}` confirms whether or not the task existed.
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Ok(id) = Uuid::parse_str(&id) else {
        return Ok(Json(MessageResponse::new(DELETE_CONFIRMATION)));
    };
    let message = with_service(&state, move |service| service.delete_task(&id)).await?;
    tracing::info!(%id, "deleted task");
    Ok(Json(MessageResponse::new(message)))
}
