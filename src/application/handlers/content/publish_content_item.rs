//! PublishContentItemHandler - "publish now".
//!
//! Snapshot the current authoritative fields, then write the new fields and
//! the published state in one update.

use std::sync::Arc;

use crate::application::handlers::version::archive_live_fields;
use crate::domain::content::{ContentError, ContentFields, ContentItem, PublicationStatus};
use crate::domain::foundation::{AuthorId, ContentItemId, StateMachine, Timestamp};
use crate::domain::version::VersionSnapshot;
use crate::ports::{ContentRepository, VersionRepository};

/// Command to publish an existing item immediately.
#[derive(Debug, Clone)]
pub struct PublishContentItemCommand {
    pub item_id: ContentItemId,
    /// Fields to publish; `None` publishes the stored fields as they are.
    pub fields: Option<ContentFields>,
    pub expected_revision: Option<u64>,
    /// Recorded as `created_by` on the snapshot; defaults to the item's author.
    pub actor: Option<AuthorId>,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishContentItemResult {
    pub item: ContentItem,
    /// Snapshot of the pre-publish fields.
    pub snapshot: VersionSnapshot,
}

/// Handler for publishing content items.
pub struct PublishContentItemHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl PublishContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self { content, versions }
    }

    pub async fn handle(
        &self,
        cmd: PublishContentItemCommand,
    ) -> Result<PublishContentItemResult, ContentError> {
        let item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;
        item.ensure_revision(cmd.expected_revision)?;

        if !item.status().can_transition_to(&PublicationStatus::Published) {
            return Err(ContentError::invalid_state(format!(
                "cannot publish content item in status {:?}",
                item.status()
            )));
        }

        // Apply to a copy first so invalid fields never leave a snapshot behind
        let mut published = item.clone();
        published.publish_now(cmd.fields, Timestamp::now())?;

        let actor = cmd.actor.unwrap_or_else(|| item.author_id().clone());
        let snapshot = archive_live_fields(self.versions.as_ref(), &item, actor).await?;

        let revision = self.content.update(&published).await?;
        published.mark_persisted(revision);

        tracing::info!(
            item_id = %published.id(),
            version_number = snapshot.version_number().value(),
            "Content item published"
        );
        Ok(PublishContentItemResult {
            item: published,
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryContentRepository, InMemoryVersionRepository};

    struct Fixture {
        content: Arc<InMemoryContentRepository>,
        versions: Arc<InMemoryVersionRepository>,
        handler: PublishContentItemHandler,
    }

    fn fixture() -> Fixture {
        let content = Arc::new(InMemoryContentRepository::new());
        let versions = Arc::new(InMemoryVersionRepository::new());
        let handler = PublishContentItemHandler::new(content.clone(), versions.clone());
        Fixture {
            content,
            versions,
            handler,
        }
    }

    fn author() -> AuthorId {
        AuthorId::new("author-1").unwrap()
    }

    async fn stored_draft(fixture: &Fixture) -> ContentItem {
        let item = ContentItem::new(
            ContentItemId::new(),
            author(),
            ContentFields::with_title_and_body("Before", "Body"),
        )
        .unwrap();
        fixture.content.save(&item).await.unwrap();
        item
    }

    fn command(item: &ContentItem, fields: Option<ContentFields>) -> PublishContentItemCommand {
        PublishContentItemCommand {
            item_id: *item.id(),
            fields,
            expected_revision: None,
            actor: Some(AuthorId::new("editor-2").unwrap()),
        }
    }

    #[tokio::test]
    async fn snapshots_previous_fields_then_publishes_new_ones() {
        let fixture = fixture();
        let item = stored_draft(&fixture).await;

        let result = fixture
            .handler
            .handle(command(
                &item,
                Some(ContentFields::with_title_and_body("After", "Body")),
            ))
            .await
            .unwrap();

        assert_eq!(result.snapshot.fields().title, "Before");
        assert_eq!(result.snapshot.created_by().as_str(), "editor-2");
        assert_eq!(result.item.fields().title, "After");
        assert!(result.item.is_published());
        assert!(result.item.scheduled_at().is_none());

        let stored = fixture.content.find_by_id(item.id()).await.unwrap().unwrap();
        assert!(stored.is_published());
        assert_eq!(stored.fields().title, "After");
    }

    #[tokio::test]
    async fn publishing_a_scheduled_item_clears_the_schedule() {
        let fixture = fixture();
        let mut item = stored_draft(&fixture).await;
        let now = Timestamp::now();
        item.schedule(now.plus_secs(3600), now).unwrap();
        let revision = fixture.content.update(&item).await.unwrap();
        item.mark_persisted(revision);

        let result = fixture.handler.handle(command(&item, None)).await.unwrap();

        assert!(result.item.is_published());
        assert!(result.item.scheduled_at().is_none());
    }

    #[tokio::test]
    async fn already_published_is_invalid_and_creates_no_snapshot() {
        let fixture = fixture();
        let item = stored_draft(&fixture).await;
        fixture.handler.handle(command(&item, None)).await.unwrap();

        let err = fixture.handler.handle(command(&item, None)).await.unwrap_err();

        assert!(matches!(err, ContentError::InvalidState(_)));
        assert_eq!(fixture.versions.total_count().await, 1);
    }

    #[tokio::test]
    async fn invalid_fields_leave_no_snapshot() {
        let fixture = fixture();
        let item = stored_draft(&fixture).await;

        let err = fixture
            .handler
            .handle(command(&item, Some(ContentFields::default())))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::ValidationFailed { .. }));
        assert_eq!(fixture.versions.total_count().await, 0);
    }
}
