//! Autosave error types.

use crate::domain::foundation::{ContentItemId, DomainError};
use crate::ports::DraftCacheError;

/// Errors reported by an autosave session.
///
/// None of these are fatal to the session: the buffer stays dirty and the
/// next edit schedules another attempt.
#[derive(Debug, thiserror::Error)]
pub enum AutosaveError {
    #[error("Failed to write draft to content store: {0}")]
    Store(#[from] DomainError),

    #[error("Failed to write local draft: {0}")]
    Cache(#[from] DraftCacheError),

    #[error("Failed to serialize draft: {0}")]
    Serialization(String),

    #[error("Session is already bound to content item {current}, cannot rebind to {requested}")]
    AlreadyBound {
        current: ContentItemId,
        requested: ContentItemId,
    },

    #[error("Autosave session has stopped")]
    Stopped,
}

impl From<serde_json::Error> for AutosaveError {
    fn from(err: serde_json::Error) -> Self {
        AutosaveError::Serialization(err.to_string())
    }
}
