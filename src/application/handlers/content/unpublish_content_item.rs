//! UnpublishContentItemHandler - explicit return of a live item to draft.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentItem};
use crate::domain::foundation::ContentItemId;
use crate::ports::ContentRepository;

/// Command to unpublish an item.
#[derive(Debug, Clone)]
pub struct UnpublishContentItemCommand {
    pub item_id: ContentItemId,
    pub expected_revision: Option<u64>,
}

/// Handler for unpublishing content items.
pub struct UnpublishContentItemHandler {
    content: Arc<dyn ContentRepository>,
}

impl UnpublishContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    pub async fn handle(
        &self,
        cmd: UnpublishContentItemCommand,
    ) -> Result<ContentItem, ContentError> {
        let mut item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;
        item.ensure_revision(cmd.expected_revision)?;

        item.unpublish()?;

        let revision = self.content.update(&item).await?;
        item.mark_persisted(revision);

        tracing::info!(item_id = %item.id(), "Content item unpublished");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentRepository;
    use crate::domain::content::{ContentFields, PublicationStatus};
    use crate::domain::foundation::{AuthorId, Timestamp};

    #[tokio::test]
    async fn unpublish_returns_to_draft_and_keeps_fields() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let mut item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("author-1").unwrap(),
            ContentFields::with_title_and_body("Live", "Body"),
        )
        .unwrap();
        item.publish_now(None, Timestamp::now()).unwrap();
        repo.save(&item).await.unwrap();
        let handler = UnpublishContentItemHandler::new(repo.clone());

        let draft = handler
            .handle(UnpublishContentItemCommand {
                item_id: *item.id(),
                expected_revision: None,
            })
            .await
            .unwrap();

        assert_eq!(draft.status(), PublicationStatus::Draft);
        assert!(draft.published_at().is_none());
        assert_eq!(draft.fields().title, "Live");
    }

    #[tokio::test]
    async fn unpublish_on_a_draft_is_invalid() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("author-1").unwrap(),
            ContentFields::with_title_and_body("Draft", "Body"),
        )
        .unwrap();
        repo.save(&item).await.unwrap();
        let handler = UnpublishContentItemHandler::new(repo.clone());

        let err = handler
            .handle(UnpublishContentItemCommand {
                item_id: *item.id(),
                expected_revision: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::InvalidState(_)));
    }
}
