//! CreateVersionHandler - manual snapshot of an item.

use std::sync::Arc;

use crate::domain::content::ContentError;
use crate::domain::foundation::{AuthorId, ContentItemId};
use crate::domain::version::{NewVersion, VersionSnapshot, VersionedFields};
use crate::ports::{ContentRepository, VersionRepository};

/// Command to archive a snapshot.
#[derive(Debug, Clone)]
pub struct CreateVersionCommand {
    pub item_id: ContentItemId,
    /// Fields to archive; `None` archives the item's current live fields.
    pub fields: Option<VersionedFields>,
    /// Defaults to the item's author.
    pub created_by: Option<AuthorId>,
}

/// Handler for creating version snapshots.
pub struct CreateVersionHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl CreateVersionHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self { content, versions }
    }

    pub async fn handle(&self, cmd: CreateVersionCommand) -> Result<VersionSnapshot, ContentError> {
        let item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;

        let fields = cmd.fields.unwrap_or_else(|| item.versioned_fields());
        let created_by = cmd
            .created_by
            .unwrap_or_else(|| item.author_id().clone());
        let snapshot = self
            .versions
            .create_next(NewVersion {
                content_item_id: cmd.item_id,
                fields,
                created_by,
            })
            .await?;

        tracing::info!(
            item_id = %cmd.item_id,
            version_number = snapshot.version_number().value(),
            "Version created"
        );
        Ok(snapshot)
    }
}
