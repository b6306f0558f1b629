//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chatrelay_core::resolver::ResolveError;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

/// Generic message carried by every hard failure.
pub const CHAT_FAILURE_MESSAGE: &str = "Failed to get response from AI";

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
///
/// Every variant is a hard failure reported as `500` with
/// `{"error", "details"}`, the contract chat clients already depend on.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Input(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, details) = match &self {
            AppError::Input(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.as_str()),
            AppError::Upstream(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.as_str()),
            AppError::Internal(m) => (StatusCode::INTERNAL_SERVER_ERROR, m.as_str()),
        };
        error!(%status, "chat error: {details}");
        let body = Json(ErrorResponse {
            error: CHAT_FAILURE_MESSAGE.to_string(),
            details: details.to_string(),
        });
        (status, body).into_response()
    }
}

impl From<ResolveError> for AppError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::Input(msg) => AppError::Input(msg),
            ResolveError::Upstream(e) => AppError::Upstream(e.to_string()),
            ResolveError::Unanswered => AppError::Internal(ResolveError::Unanswered.to_string()),
        }
    }
}
