//! Shared HTTP error body and the mapping from application errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::domain::content::ContentError;

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path or body value.
    BadRequest(String),
    Content(ContentError),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        ApiError::Content(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg)),
            ApiError::Content(err) => content_error_parts(err),
        };

        (status, Json(body)).into_response()
    }
}

fn content_error_parts(error: ContentError) -> (StatusCode, ErrorResponse) {
    let code = error.code();
    let message = error.message();

    match &error {
        ContentError::NotFound(_) | ContentError::VersionNotFound { .. } => {
            (StatusCode::NOT_FOUND, ErrorResponse::new(code, message))
        }
        ContentError::Conflict(_) => (StatusCode::CONFLICT, ErrorResponse::new(code, message)),
        ContentError::InvalidState(_) => {
            (StatusCode::BAD_REQUEST, ErrorResponse::new(code, message))
        }
        ContentError::ValidationFailed { field, .. } => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(code, message).with_details(serde_json::json!({ "field": field })),
        ),
        ContentError::Infrastructure(_) => {
            tracing::error!(error = %message, "Request failed");
            (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::internal(message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ContentItemId;
    use crate::domain::version::VersionNumber;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            status_of(ContentError::NotFound(ContentItemId::new())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(ContentError::version_not_found(
                ContentItemId::new(),
                VersionNumber::FIRST
            )),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn conflict_maps_to_409() {
        assert_eq!(status_of(ContentError::conflict("stale")), StatusCode::CONFLICT);
    }

    #[test]
    fn validation_and_state_errors_map_to_400() {
        assert_eq!(
            status_of(ContentError::validation("title", "required")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(ContentError::invalid_state("already published")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(ApiError::bad_request("bad id")), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        assert_eq!(
            status_of(ContentError::infrastructure("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn validation_body_names_the_field() {
        let (_, body) = content_error_parts(ContentError::validation("slug", "too long"));
        assert_eq!(body.code, "VALIDATION_FAILED");
        assert_eq!(body.details.unwrap()["field"], "slug");
    }
}
