use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Body returned for every failure the client should not learn details about.
pub const GENERIC_ERROR: &str = "Something went wrong";
pub const PROVIDER_UNAVAILABLE: &str = "Role suggestions are temporarily unavailable";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Provider(_) | AppError::Store(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Provider(msg) => {
                tracing::error!("Provider error: {msg}");
                PROVIDER_UNAVAILABLE.to_string()
            }
            AppError::Store(e) => {
                tracing::error!("Database error: {e}");
                GENERIC_ERROR.to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                GENERIC_ERROR.to_string()
            }
        };

        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}
