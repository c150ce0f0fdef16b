//! In-Memory Local Draft Cache
//!
//! Useful for testing and for servers without a writable draft directory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::draft::LocalDraftEntry;
use crate::domain::foundation::LocalDraftKey;
use crate::ports::{DraftCacheError, LocalDraftCache};

/// In-memory draft slots
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftCache {
    slots: Arc<RwLock<HashMap<LocalDraftKey, LocalDraftEntry>>>,
}

impl InMemoryDraftCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of occupied slots
    pub async fn slot_count(&self) -> usize {
        self.slots.read().await.len()
    }
}

#[async_trait]
impl LocalDraftCache for InMemoryDraftCache {
    async fn load(&self, key: &LocalDraftKey) -> Result<Option<LocalDraftEntry>, DraftCacheError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn store(
        &self,
        key: &LocalDraftKey,
        entry: &LocalDraftEntry,
    ) -> Result<(), DraftCacheError> {
        self.slots.write().await.insert(key.clone(), entry.clone());
        Ok(())
    }

    async fn clear(&self, key: &LocalDraftKey) -> Result<(), DraftCacheError> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
