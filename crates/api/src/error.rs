//! Mapping of domain errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fakelink_core::images::StorageError;
use fakelink_core::links::LinkError;
use fakelink_core::preview::PreviewError;
use fakelink_shared::AppError;
use serde_json::json;
use tracing::error;

/// An [`AppError`] on its way out as a JSON response.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// A 400 response with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<LinkError> for ApiError {
    fn from(err: LinkError) -> Self {
        let app = match err {
            LinkError::NotFound(slug) => AppError::NotFound(format!("link {slug}")),
            LinkError::Validation(e) => AppError::Validation(e.to_string()),
            LinkError::Storage(e @ StorageError::Encode(_)) => AppError::Validation(e.to_string()),
            LinkError::Storage(e) => AppError::Storage(e.to_string()),
        };
        Self(app)
    }
}

impl From<PreviewError> for ApiError {
    fn from(err: PreviewError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(error = %self.0, "Request failed");
        }

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.public_message(),
            })),
        )
            .into_response()
    }
}
