use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::response::ApiError;
use crate::dto::MessageResponse;
use crate::store::StoreError;

/// Application error types. The display string is the client-facing message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Storage(String),
}

/// Error codes, used as a structured log field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ValidationError,
    BadRequest,
    NotFound,
    StorageError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::StorageError => "STORAGE_ERROR",
        }
    }
}

impl AppError {
    pub fn user_not_found() -> Self {
        AppError::NotFound("User not found".to_string())
    }

    /// Store failure on a write path: bad ids and refused writes are the
    /// client's fault, an unreachable store is not.
    pub fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::InvalidId(_) | StoreError::Rejected(_) => AppError::Validation(err.to_string()),
            StoreError::Unavailable(_) => AppError::Storage(err.to_string()),
        }
    }

    /// Store failure on a read or delete path: always a server error.
    pub fn from_read(err: StoreError) -> Self {
        AppError::Storage(err.to_string())
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::BadRequest(_) => ErrorCode::BadRequest,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Storage(_) => ErrorCode::StorageError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code().as_str();

        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        } else if status == StatusCode::NOT_FOUND {
            tracing::debug!(code, message = %self, "not found");
        } else {
            tracing::warn!(code, error = %self, "request rejected");
        }

        match self {
            // Not-found is an outcome, not an error: it carries `message`
            AppError::NotFound(message) => (status, Json(MessageResponse::new(message))).into_response(),
            other => (status, Json(ApiError::new(other.to_string()))).into_response(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(_) => AppError::Validation(rejection.body_text()),
            _ => AppError::BadRequest(rejection.body_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use rstest::rstest;
    use serde_json::{json, Value};

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[rstest]
    #[case(AppError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::BadRequest("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::NotFound("gone".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::Storage("down".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_code_matches_variant(#[case] err: AppError, #[case] expected: StatusCode) {
        assert_eq!(err.status_code(), expected);
    }

    #[tokio::test]
    async fn errors_render_under_error_key() {
        let (status, body) = render(AppError::Storage("connection refused".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "connection refused" }));
    }

    #[tokio::test]
    async fn not_found_renders_under_message_key() {
        let (status, body) = render(AppError::user_not_found()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "User not found" }));
    }

    #[test]
    fn write_failures_split_by_cause() {
        assert_eq!(
            AppError::from_write(StoreError::InvalidId("x".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from_write(StoreError::Rejected("check".into())).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from_write(StoreError::Unavailable("down".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn read_failures_are_always_server_errors() {
        assert_eq!(
            AppError::from_read(StoreError::InvalidId("x".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
