//! API error type and its JSON rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tasklist_core::{MessageResponse, ServiceError, NOT_FOUND_MESSAGE};
use thiserror::Error;
use tokio::task::JoinError;

/// Errors a handler can answer with. Rendered as `{ "message": ... }`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{}", NOT_FOUND_MESSAGE)]
    NotFound,

    /// Store failure; the underlying message is passed through to the client.
    #[error("{0}")]
    Store(String),

    #[error("request worker failed: {0}")]
    Worker(#[from] JoinError),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::NotFound(_) => Self::NotFound,
            ServiceError::Store(source) => Self::Store(format!("{source:#}")),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
