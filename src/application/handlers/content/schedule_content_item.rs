//! ScheduleContentItemHandler - defer publication to a future time.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentItem};
use crate::domain::foundation::{ContentItemId, Timestamp};
use crate::ports::ContentRepository;

/// Command to schedule (or reschedule) an item.
#[derive(Debug, Clone)]
pub struct ScheduleContentItemCommand {
    pub item_id: ContentItemId,
    pub scheduled_at: Timestamp,
    pub expected_revision: Option<u64>,
}

/// Handler for scheduling content items.
pub struct ScheduleContentItemHandler {
    content: Arc<dyn ContentRepository>,
}

impl ScheduleContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    pub async fn handle(&self, cmd: ScheduleContentItemCommand) -> Result<ContentItem, ContentError> {
        let mut item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;
        item.ensure_revision(cmd.expected_revision)?;

        item.schedule(cmd.scheduled_at, Timestamp::now())?;

        let revision = self.content.update(&item).await?;
        item.mark_persisted(revision);

        tracing::info!(
            item_id = %item.id(),
            scheduled_at = %cmd.scheduled_at,
            "Content item scheduled"
        );
        Ok(item)
    }
}
