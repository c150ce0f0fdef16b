//! DeleteContentItemHandler - remove an item and its version history.
//!
//! The item goes first. Its history is only cleared once that delete has
//! succeeded; stores with a foreign-key cascade will already have done it.

use std::sync::Arc;

use crate::domain::content::ContentError;
use crate::domain::foundation::ContentItemId;
use crate::ports::{ContentRepository, VersionRepository};

/// Command to delete an item.
#[derive(Debug, Clone)]
pub struct DeleteContentItemCommand {
    pub item_id: ContentItemId,
}

/// Result of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteContentItemResult {
    pub deleted_versions: u64,
}

/// Handler for deleting content items.
pub struct DeleteContentItemHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl DeleteContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self { content, versions }
    }

    pub async fn handle(
        &self,
        cmd: DeleteContentItemCommand,
    ) -> Result<DeleteContentItemResult, ContentError> {
        if self.content.find_by_id(&cmd.item_id).await?.is_none() {
            return Err(ContentError::not_found(cmd.item_id));
        }

        let deleted_versions = self.versions.list_for_item(&cmd.item_id).await?.len() as u64;
        self.content.delete(&cmd.item_id).await?;

        if let Err(e) = self.versions.delete_all_for_item(&cmd.item_id).await {
            tracing::warn!(item_id = %cmd.item_id, error = %e, "Failed to clear version history");
        }

        tracing::info!(item_id = %cmd.item_id, deleted_versions, "Content item deleted");
        Ok(DeleteContentItemResult { deleted_versions })
    }
}
