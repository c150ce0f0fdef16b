//! In-Memory Version Repository
//!
//! Numbering happens while the write lock is held, so reading the current
//! maximum and inserting the next snapshot is one critical section.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{ContentItemId, DomainError, Timestamp};
use crate::domain::version::{NewVersion, VersionNumber, VersionSnapshot};
use crate::ports::VersionRepository;

/// In-memory version archive
#[derive(Debug, Clone, Default)]
pub struct InMemoryVersionRepository {
    versions: Arc<RwLock<HashMap<ContentItemId, Vec<VersionSnapshot>>>>,
}

impl InMemoryVersionRepository {
    /// Create an empty archive
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of snapshots across all items
    pub async fn total_count(&self) -> usize {
        self.versions.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl VersionRepository for InMemoryVersionRepository {
    async fn create_next(&self, version: NewVersion) -> Result<VersionSnapshot, DomainError> {
        let mut versions = self.versions.write().await;
        let history = versions.entry(version.content_item_id).or_default();

        let current_max = history.iter().map(VersionSnapshot::version_number).max();
        let snapshot = VersionSnapshot::from_new(
            version,
            VersionNumber::next_after(current_max),
            Timestamp::now(),
        );
        history.push(snapshot.clone());
        Ok(snapshot)
    }

    async fn list_for_item(
        &self,
        item_id: &ContentItemId,
    ) -> Result<Vec<VersionSnapshot>, DomainError> {
        let versions = self.versions.read().await;
        let mut history = versions.get(item_id).cloned().unwrap_or_default();
        history.sort_by_key(|v| std::cmp::Reverse(v.version_number()));
        Ok(history)
    }

    async fn find(
        &self,
        item_id: &ContentItemId,
        version: VersionNumber,
    ) -> Result<Option<VersionSnapshot>, DomainError> {
        let versions = self.versions.read().await;
        Ok(versions
            .get(item_id)
            .and_then(|history| history.iter().find(|v| v.version_number() == version))
            .cloned())
    }

    async fn delete_all_for_item(&self, item_id: &ContentItemId) -> Result<u64, DomainError> {
        let removed = self.versions.write().await.remove(item_id);
        Ok(removed.map(|history| history.len() as u64).unwrap_or(0))
    }
}
