//! RestoreVersionHandler - copy a snapshot over the live fields.
//!
//! Restoring does not itself archive anything; callers that want the
//! pre-restore state kept create a version first.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentItem};
use crate::domain::foundation::ContentItemId;
use crate::domain::version::VersionNumber;
use crate::ports::{ContentRepository, VersionRepository};

/// Command to restore a version.
#[derive(Debug, Clone)]
pub struct RestoreVersionCommand {
    pub item_id: ContentItemId,
    pub version_number: VersionNumber,
    pub expected_revision: Option<u64>,
}

/// Result of a successful restore.
#[derive(Debug, Clone)]
pub struct RestoreVersionResult {
    pub item: ContentItem,
    pub restored_from: VersionNumber,
}

/// Handler for restoring versions.
pub struct RestoreVersionHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl RestoreVersionHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self { content, versions }
    }

    pub async fn handle(
        &self,
        cmd: RestoreVersionCommand,
    ) -> Result<RestoreVersionResult, ContentError> {
        let mut item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;
        item.ensure_revision(cmd.expected_revision)?;

        let snapshot = self
            .versions
            .find(&cmd.item_id, cmd.version_number)
            .await?
            .ok_or_else(|| ContentError::version_not_found(cmd.item_id, cmd.version_number))?;

        item.restore(snapshot.fields());

        let revision = self.content.update(&item).await?;
        item.mark_persisted(revision);

        tracing::info!(
            item_id = %item.id(),
            version_number = cmd.version_number.value(),
            "Version restored"
        );
        Ok(RestoreVersionResult {
            item,
            restored_from: cmd.version_number,
        })
    }
}
