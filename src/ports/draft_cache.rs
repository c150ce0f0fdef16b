//! Local draft cache port - the per-device slot for never-saved items.

use async_trait::async_trait;

use crate::domain::draft::LocalDraftEntry;
use crate::domain::foundation::LocalDraftKey;

/// Errors that can occur during local draft cache operations
#[derive(Debug, thiserror::Error)]
pub enum DraftCacheError {
    #[error("Failed to serialize draft: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize draft: {0}")]
    DeserializationFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Port for the single-slot per-device draft store.
#[async_trait]
pub trait LocalDraftCache: Send + Sync {
    /// Load the entry under `key`, if any.
    async fn load(&self, key: &LocalDraftKey) -> Result<Option<LocalDraftEntry>, DraftCacheError>;

    /// Overwrite the entry under `key`.
    async fn store(&self, key: &LocalDraftKey, entry: &LocalDraftEntry)
        -> Result<(), DraftCacheError>;

    /// Remove the entry under `key`. Clearing an empty slot is not an error.
    async fn clear(&self, key: &LocalDraftKey) -> Result<(), DraftCacheError>;
}
