use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::model::StoreError;

/// Client-facing failure taxonomy. Every request either completes or fails
/// with exactly one of these; there are no partial responses or retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("duration must be a positive whole number")]
    InvalidDuration,
    #[error("date could not be parsed")]
    InvalidDate,
    #[error("username is already taken")]
    UsernameTaken,
    #[error("unknown user id")]
    NotFound,
    #[error("something went wrong")]
    StorageFailure,
}

impl ApiError {
    pub fn code(&self) -> StatusCode {
        match self {
            ApiError::MissingField { .. }
            | ApiError::InvalidDuration
            | ApiError::InvalidDate
            | ApiError::UsernameTaken => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Render ApiError into a structured error payload
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.code(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// Storage detail goes to the log, never to the client
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateKey => ApiError::UsernameTaken,
            StoreError::Sqlite(e) => {
                error!("sqlite failure: {e}");
                ApiError::StorageFailure
            },
        }
    }
}

// This enables using `??` on `interact` results in route handlers
impl From<deadpool_sqlite::InteractError> for ApiError {
    fn from(err: deadpool_sqlite::InteractError) -> Self {
        error!("database interact failed: {err}");
        ApiError::StorageFailure
    }
}
