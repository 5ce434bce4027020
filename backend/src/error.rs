use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use shared::PersistenceError;
use thiserror::Error;

/// Error returned by API handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Persistence(PersistenceError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Persistence(PersistenceError::Invalid { .. }) => StatusCode::BAD_REQUEST,
            ApiError::Persistence(PersistenceError::Storage(_))
            | ApiError::Persistence(PersistenceError::Transport(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
