use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use userstore_core::storage::{
    create_error_to_status_code, repository_error_to_status_code, RepositoryError,
};

/// Error response rendered as `{"message": ...}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "User not found")
    }

    /// Maps a repository error using `failure` as the message for store faults.
    ///
    /// Invalid requests keep their own message so the caller can fix them.
    pub fn from_repository(error: &RepositoryError, failure: &str) -> Self {
        let status = StatusCode::from_u16(repository_error_to_status_code(error))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match error {
            RepositoryError::InvalidData(_) => Self::new(status, error.to_string()),
            _ => Self::new(status, failure),
        }
    }

    /// Maps a failed create. Store faults are reported as 400.
    pub fn from_create(error: &RepositoryError) -> Self {
        let status = StatusCode::from_u16(create_error_to_status_code(error))
            .unwrap_or(StatusCode::BAD_REQUEST);
        Self::new(status, "Failed to create user")
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, message = %self.message, "API error");
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
