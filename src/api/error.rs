//! Error responses.
//!
//! Everything a handler can fail with collapses into [`AppError`]; bodies
//! are always `{"detail": "..."}` so clients have one place to look.
//! Validation and missing-input problems are client errors; tool failures
//! are server errors and keep the tool's stderr in the detail string.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::CaduceusError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CaduceusError> for AppError {
    fn from(err: CaduceusError) -> Self {
        match &err {
            CaduceusError::InvalidInput(_)
            | CaduceusError::UnsupportedExtension(_)
            | CaduceusError::NotFound(_)
            | CaduceusError::InvalidFormat(_)
            | CaduceusError::SequenceNotFound(_) => AppError::BadRequest(err.to_string()),
            _ => AppError::Internal(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::from(CaduceusError::Io(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();
        if status.is_server_error() {
            tracing::error!(%status, detail, "request failed");
        }
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
