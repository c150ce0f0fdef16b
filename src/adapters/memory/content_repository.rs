//! In-Memory Content Repository
//!
//! Keeps content items in a map behind an async lock. Used by tests and by
//! the server when no database is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::content::ContentItem;
use crate::domain::foundation::{ContentItemId, DomainError, ErrorCode, Timestamp};
use crate::ports::ContentRepository;

/// In-memory authoritative store for content items
#[derive(Debug, Clone, Default)]
pub struct InMemoryContentRepository {
    items: Arc<RwLock<HashMap<ContentItemId, ContentItem>>>,
    writes: Arc<AtomicUsize>,
}

impl InMemoryContentRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored items
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// True when no items are stored
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// Number of successful writes of any kind since creation
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

fn not_found(id: &ContentItemId) -> DomainError {
    DomainError::new(
        ErrorCode::ContentItemNotFound,
        format!("Content item not found: {}", id),
    )
}

#[async_trait]
impl ContentRepository for InMemoryContentRepository {
    async fn save(&self, item: &ContentItem) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        if items.contains_key(item.id()) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Content item already exists: {}", item.id()),
            ));
        }
        items.insert(*item.id(), item.clone());
        self.record_write();
        Ok(())
    }

    async fn update(&self, item: &ContentItem) -> Result<u64, DomainError> {
        let mut items = self.items.write().await;
        let stored = items.get_mut(item.id()).ok_or_else(|| not_found(item.id()))?;

        if stored.revision() != item.revision() {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!(
                    "Content item {} was modified concurrently (stored revision {}, written {})",
                    item.id(),
                    stored.revision(),
                    item.revision()
                ),
            ));
        }

        let revision = item.revision() + 1;
        let mut next = item.clone();
        if !item.discards_draft() {
            if let Some(draft) = stored.draft_snapshot() {
                next.set_draft_snapshot(draft.to_string());
            }
        }
        next.mark_persisted(revision);
        *stored = next;
        self.record_write();
        Ok(revision)
    }

    async fn find_by_id(&self, id: &ContentItemId) -> Result<Option<ContentItem>, DomainError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn save_draft_snapshot(
        &self,
        id: &ContentItemId,
        snapshot: &str,
    ) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        let stored = items.get_mut(id).ok_or_else(|| not_found(id))?;
        stored.set_draft_snapshot(snapshot.to_string());
        self.record_write();
        Ok(())
    }

    async fn find_due_scheduled(&self, now: Timestamp) -> Result<Vec<ContentItem>, DomainError> {
        let items = self.items.read().await;
        let mut due: Vec<ContentItem> = items
            .values()
            .filter(|item| item.publication().is_due(now))
            .cloned()
            .collect();
        due.sort_by_key(|item| item.scheduled_at());
        Ok(due)
    }

    async fn publish_if_due(
        &self,
        id: &ContentItemId,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, DomainError> {
        let mut items = self.items.write().await;
        let Some(stored) = items.get_mut(id) else {
            return Ok(None);
        };

        if !stored.publish_if_due(now) {
            return Ok(None);
        }
        let revision = stored.revision() + 1;
        stored.mark_persisted(revision);
        self.record_write();
        Ok(stored.published_at())
    }

    async fn delete(&self, id: &ContentItemId) -> Result<(), DomainError> {
        let removed = self.items.write().await.remove(id);
        match removed {
            Some(_) => {
                self.record_write();
                Ok(())
            }
            None => Err(not_found(id)),
        }
    }
}
