//! Content repository port (authoritative store).
//!
//! Defines the contract for persisting and querying content items.
//!
//! # Design
//!
//! - **Check-and-increment writes**: `update` only succeeds when the stored
//!   revision equals the item's loaded revision
//! - **Draft writes are separate**: autosave touches only `draft_snapshot`
//!   and never the revision, so a background save cannot invalidate the
//!   token held by an open editor
//! - **Conditional publish**: the worker's flip is a single guarded update

use crate::domain::content::ContentItem;
use crate::domain::foundation::{ContentItemId, DomainError, Timestamp};
use async_trait::async_trait;

/// Repository port for content item persistence.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Insert a new item.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure or duplicate id
    async fn save(&self, item: &ContentItem) -> Result<(), DomainError>;

    /// Write every authoritative column of an existing item.
    ///
    /// The stored draft snapshot is kept unless `item.discards_draft()`, in
    /// which case it is cleared. Returns the new revision.
    ///
    /// # Errors
    ///
    /// - `ContentItemNotFound` if the item doesn't exist
    /// - `Conflict` if the stored revision differs from `item.revision()`
    /// - `DatabaseError` on persistence failure
    async fn update(&self, item: &ContentItem) -> Result<u64, DomainError>;

    /// Find an item by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &ContentItemId) -> Result<Option<ContentItem>, DomainError>;

    /// Update-only write of the autosaved draft field.
    ///
    /// # Errors
    ///
    /// - `ContentItemNotFound` if the item doesn't exist (never inserts)
    async fn save_draft_snapshot(
        &self,
        id: &ContentItemId,
        snapshot: &str,
    ) -> Result<(), DomainError>;

    /// Items with `published = false` and `scheduled_at <= now`.
    async fn find_due_scheduled(&self, now: Timestamp) -> Result<Vec<ContentItem>, DomainError>;

    /// Atomically flip one item from scheduled to published if it is still
    /// due, setting `published_at = scheduled_at` and clearing the schedule.
    ///
    /// Returns the new `published_at`, or `None` when the item was no longer
    /// due (already published, cancelled, rescheduled or deleted).
    async fn publish_if_due(
        &self,
        id: &ContentItemId,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, DomainError>;

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// - `ContentItemNotFound` if the item doesn't exist
    async fn delete(&self, id: &ContentItemId) -> Result<(), DomainError>;
}
