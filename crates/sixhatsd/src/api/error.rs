//! HTTP error mapping. Every error body is `{"detail": "..."}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use sixhats_core::HatsError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unprocessable(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn session_not_found() -> Self {
        ApiError::NotFound("Session not found".to_string())
    }
}

impl From<HatsError> for ApiError {
    fn from(err: HatsError) -> Self {
        match err {
            HatsError::SessionNotFound(_) => ApiError::session_not_found(),
            HatsError::AnalysisConflict { status, .. } => {
                ApiError::Conflict(format!("Analysis cannot start: session is {status}"))
            }
            HatsError::Validation(msg) => ApiError::Unprocessable(msg),
            other @ (HatsError::InvalidTransition { .. } | HatsError::Backend(_)) => {
                ApiError::Internal(other.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}
