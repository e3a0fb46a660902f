//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use govpal_engine::EngineError;

/// API-level errors with a stable JSON error body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Unknown session or resource.
    #[error("not found: {0}")]
    NotFound(String),
    /// Request failed boundary validation.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Session capacity reached.
    #[error("session limit reached")]
    SessionLimit,
}

impl From<EngineError> for ApiError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::SessionNotFound(id) => Self::NotFound(format!("session {id}")),
            EngineError::Core(core) => Self::BadRequest(core.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::SessionLimit => StatusCode::SERVICE_UNAVAILABLE,
        };
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
