//! Error types for the API server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gourmet_store_core::StoreError;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
            code: &'static str,
        }

        let (status, code) = match &self {
            ApiError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            ApiError::Store(StoreError::DuplicateName(_)) => {
                (StatusCode::BAD_REQUEST, "DUPLICATE_NAME")
            }
            ApiError::Store(StoreError::NotFound(_)) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Store(StoreError::Malformed(_)) => {
                (StatusCode::BAD_REQUEST, "MALFORMED_STORE")
            }
            ApiError::Store(StoreError::Io(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_IO")
            }
        };

        let body = ErrorBody {
            error: self.to_string(),
            code,
        };

        (status, axum::Json(body)).into_response()
    }
}
