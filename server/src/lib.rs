//! HTTP surface of the task list: four endpoints under `/api/tasks` backed
//! by a [`tasklist_core::TaskService`].

pub mod api;
pub mod config;
pub mod error;

use axum::Router;
use axum::routing::{get, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use api::AppState;
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;

/// Builds the application router with CORS and request tracing applied.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(api::health_check))
        .route(
            "/api/tasks",
            get(api::list_tasks).post(api::create_task),
        )
        .route(
            "/api/tasks/",
            get(api::list_tasks).post(api::create_task),
        )
        .route(
            "/api/tasks/{id}",
            put(api::toggle_task).delete(api::delete_task),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
