//! File-based Local Draft Cache
//!
//! Each slot is one YAML file named after its key inside a single directory.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::draft::LocalDraftEntry;
use crate::domain::foundation::LocalDraftKey;
use crate::ports::{DraftCacheError, LocalDraftCache};

/// Per-device draft slots stored on disk
#[derive(Debug, Clone)]
pub struct FileDraftCache {
    base_path: PathBuf,
}

impl FileDraftCache {
    /// Create a cache rooted at `base_path`. The directory is created lazily
    /// on the first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    fn slot_path(&self, key: &LocalDraftKey) -> PathBuf {
        self.base_path.join(format!("{}.yaml", key.as_str()))
    }
}

#[async_trait]
impl LocalDraftCache for FileDraftCache {
    async fn load(&self, key: &LocalDraftKey) -> Result<Option<LocalDraftEntry>, DraftCacheError> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let yaml = fs::read_to_string(&path)
            .await
            .map_err(|e| DraftCacheError::IoError(e.to_string()))?;

        let entry = serde_yaml::from_str(&yaml)
            .map_err(|e| DraftCacheError::DeserializationFailed(e.to_string()))?;

        Ok(Some(entry))
    }

    async fn store(
        &self,
        key: &LocalDraftKey,
        entry: &LocalDraftEntry,
    ) -> Result<(), DraftCacheError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| DraftCacheError::IoError(e.to_string()))?;

        let yaml = serde_yaml::to_string(entry)
            .map_err(|e| DraftCacheError::SerializationFailed(e.to_string()))?;

        fs::write(self.slot_path(key), yaml)
            .await
            .map_err(|e| DraftCacheError::IoError(e.to_string()))
    }

    async fn clear(&self, key: &LocalDraftKey) -> Result<(), DraftCacheError> {
        let path = self.slot_path(key);
        if path.exists() {
            fs::remove_file(&path)
                .await
                .map_err(|e| DraftCacheError::IoError(e.to_string()))?;
        }
        Ok(())
    }
}
