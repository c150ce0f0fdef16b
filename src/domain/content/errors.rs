//! Content-specific error types.

use crate::domain::foundation::{ContentItemId, DomainError, ErrorCode};
use crate::domain::version::VersionNumber;

/// Errors returned by the lifecycle and version handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    /// Content item was not found.
    NotFound(ContentItemId),
    /// Requested version does not exist for the item.
    VersionNotFound {
        item_id: ContentItemId,
        version: VersionNumber,
    },
    /// Transition not allowed from the current state.
    InvalidState(String),
    /// Optimistic-concurrency check failed.
    Conflict(String),
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl ContentError {
    pub fn not_found(id: ContentItemId) -> Self {
        ContentError::NotFound(id)
    }
    pub fn version_not_found(item_id: ContentItemId, version: VersionNumber) -> Self {
        ContentError::VersionNotFound { item_id, version }
    }
    pub fn invalid_state(message: impl Into<String>) -> Self {
        ContentError::InvalidState(message.into())
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        ContentError::Conflict(message.into())
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ContentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ContentError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ContentError::NotFound(_) => ErrorCode::ContentItemNotFound,
            ContentError::VersionNotFound { .. } => ErrorCode::VersionNotFound,
            ContentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            ContentError::Conflict(_) => ErrorCode::Conflict,
            ContentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            ContentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ContentError::NotFound(id) => format!("Content item not found: {}", id),
            ContentError::VersionNotFound { item_id, version } => {
                format!("Version {} not found for content item {}", version, item_id)
            }
            ContentError::InvalidState(msg) => format!("Invalid state: {}", msg),
            ContentError::Conflict(msg) => format!("Conflict: {}", msg),
            ContentError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            ContentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ContentError {}

impl From<DomainError> for ContentError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => ContentError::InvalidState(err.message),
            ErrorCode::Conflict => ContentError::Conflict(err.message),
            ErrorCode::ValidationFailed => ContentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            // Not-found codes from a port carry no typed id; handlers map
            // missing rows to `NotFound` themselves before this point.
            _ => ContentError::Infrastructure(err.to_string()),
        }
    }
}
