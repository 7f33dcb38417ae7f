//! Error types for the HTTP API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use manuals_core::CatalogError;
use serde::Serialize;
use tracing::error;

/// Application-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing GOOGLE_SERVICE_KEY or GOOGLE_DRIVE_FOLDER_ID")]
    MissingConfig,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            error: String,
        }

        let message = self.to_string();
        error!("Request failed: {}", message);

        let body = ErrorBody {
            error: if message.is_empty() {
                "Unknown error".to_string()
            } else {
                message
            },
        };

        (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
