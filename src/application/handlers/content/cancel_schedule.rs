//! CancelScheduleHandler - return a scheduled item to draft.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentItem};
use crate::domain::foundation::ContentItemId;
use crate::ports::ContentRepository;

/// Command to cancel a pending schedule.
#[derive(Debug, Clone)]
pub struct CancelScheduleCommand {
    pub item_id: ContentItemId,
    pub expected_revision: Option<u64>,
}

/// Handler for cancelling schedules.
pub struct CancelScheduleHandler {
    content: Arc<dyn ContentRepository>,
}

impl CancelScheduleHandler {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    pub async fn handle(&self, cmd: CancelScheduleCommand) -> Result<ContentItem, ContentError> {
        let mut item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;
        item.ensure_revision(cmd.expected_revision)?;

        item.cancel_schedule()?;

        // Fails with Conflict if the worker published it in the meantime
        let revision = self.content.update(&item).await?;
        item.mark_persisted(revision);

        tracing::info!(item_id = %item.id(), "Content item schedule cancelled");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentRepository;
    use crate::domain::content::{ContentFields, PublicationStatus};
    use crate::domain::foundation::{AuthorId, Timestamp};

    async fn scheduled_item(repo: &InMemoryContentRepository, at: Timestamp, now: Timestamp) -> ContentItem {
        let mut item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("author-1").unwrap(),
            ContentFields::with_title_and_body("Soon", "Body"),
        )
        .unwrap();
        item.schedule(at, now).unwrap();
        repo.save(&item).await.unwrap();
        item
    }

    #[tokio::test]
    async fn cancel_returns_to_draft() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let now = Timestamp::now();
        let item = scheduled_item(&repo, now.plus_secs(60), now).await;
        let handler = CancelScheduleHandler::new(repo.clone());

        let cancelled = handler
            .handle(CancelScheduleCommand {
                item_id: *item.id(),
                expected_revision: Some(0),
            })
            .await
            .unwrap();

        assert_eq!(cancelled.status(), PublicationStatus::Draft);
        assert!(cancelled.scheduled_at().is_none());
    }

    #[tokio::test]
    async fn cancel_after_worker_published_is_a_conflict() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let now = Timestamp::now();
        let item = scheduled_item(&repo, now.plus_secs(60), now).await;
        let handler = CancelScheduleHandler::new(repo.clone());

        // Editor loaded revision 0, then the worker flipped the item
        repo.publish_if_due(item.id(), now.plus_secs(120)).await.unwrap();

        let err = handler
            .handle(CancelScheduleCommand {
                item_id: *item.id(),
                expected_revision: Some(0),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Conflict(_)));
    }

    #[tokio::test]
    async fn cancel_on_a_draft_is_invalid() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("author-1").unwrap(),
            ContentFields::with_title_and_body("Draft", "Body"),
        )
        .unwrap();
        repo.save(&item).await.unwrap();
        let handler = CancelScheduleHandler::new(repo.clone());

        let err = handler
            .handle(CancelScheduleCommand {
                item_id: *item.id(),
                expected_revision: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::InvalidState(_)));
    }
}
