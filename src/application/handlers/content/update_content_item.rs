//! UpdateContentItemHandler - explicit save of an existing item.

use std::sync::Arc;

use crate::application::handlers::version::archive_live_fields;
use crate::domain::content::{ContentError, ContentFields, ContentItem};
use crate::domain::foundation::{AuthorId, ContentItemId};
use crate::domain::version::VersionSnapshot;
use crate::ports::{ContentRepository, VersionRepository};

/// Command to replace an item's live fields.
#[derive(Debug, Clone)]
pub struct UpdateContentItemCommand {
    pub item_id: ContentItemId,
    pub fields: ContentFields,
    pub expected_revision: Option<u64>,
    /// Recorded as `created_by` on the snapshot; defaults to the item's author.
    pub actor: Option<AuthorId>,
}

/// Result of a successful update.
#[derive(Debug, Clone)]
pub struct UpdateContentItemResult {
    pub item: ContentItem,
    /// Snapshot of the previous fields, taken when a published item changed.
    pub snapshot: Option<VersionSnapshot>,
}

/// Handler for updating content items.
pub struct UpdateContentItemHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl UpdateContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self { content, versions }
    }

    pub async fn handle(
        &self,
        cmd: UpdateContentItemCommand,
    ) -> Result<UpdateContentItemResult, ContentError> {
        // 1. Load and check the client's revision
        let item = self
            .content
            .find_by_id(&cmd.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(cmd.item_id))?;
        item.ensure_revision(cmd.expected_revision)?;

        // 2. Validate before archiving anything
        let mut updated = item.clone();
        updated.update_fields(cmd.fields)?;

        // 3. Live content keeps a history of what readers saw
        let snapshot = if item.is_published() {
            let actor = cmd.actor.unwrap_or_else(|| item.author_id().clone());
            Some(archive_live_fields(self.versions.as_ref(), &item, actor).await?)
        } else {
            None
        };

        // 4. Persist; publication state is untouched
        let revision = self.content.update(&updated).await?;
        updated.mark_persisted(revision);

        tracing::info!(item_id = %updated.id(), revision, "Content item updated");
        Ok(UpdateContentItemResult {
            item: updated,
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryContentRepository, InMemoryVersionRepository};
    use crate::domain::foundation::Timestamp;

    struct Fixture {
        content: Arc<InMemoryContentRepository>,
        versions: Arc<InMemoryVersionRepository>,
        handler: UpdateContentItemHandler,
    }

    fn fixture() -> Fixture {
        let content = Arc::new(InMemoryContentRepository::new());
        let versions = Arc::new(InMemoryVersionRepository::new());
        let handler = UpdateContentItemHandler::new(content.clone(), versions.clone());
        Fixture {
            content,
            versions,
            handler,
        }
    }

    fn author() -> AuthorId {
        AuthorId::new("author-1").unwrap()
    }

    async fn stored(fixture: &Fixture, published: bool) -> ContentItem {
        let mut item = ContentItem::new(
            ContentItemId::new(),
            author(),
            ContentFields::with_title_and_body("Original", "Body"),
        )
        .unwrap();
        if published {
            item.publish_now(None, Timestamp::now()).unwrap();
        }
        fixture.content.save(&item).await.unwrap();
        item
    }

    fn command(item: &ContentItem, title: &str, expected: Option<u64>) -> UpdateContentItemCommand {
        UpdateContentItemCommand {
            item_id: *item.id(),
            fields: ContentFields::with_title_and_body(title, "Body"),
            expected_revision: expected,
            actor: None,
        }
    }

    #[tokio::test]
    async fn updating_a_draft_does_not_snapshot() {
        let fixture = fixture();
        let item = stored(&fixture, false).await;

        let result = fixture
            .handler
            .handle(command(&item, "Edited", Some(0)))
            .await
            .unwrap();

        assert_eq!(result.item.fields().title, "Edited");
        assert_eq!(result.item.revision(), 1);
        assert!(result.snapshot.is_none());
        assert_eq!(fixture.versions.total_count().await, 0);
    }

    #[tokio::test]
    async fn updating_a_published_item_archives_previous_fields_and_stays_live() {
        let fixture = fixture();
        let item = stored(&fixture, true).await;

        let result = fixture
            .handler
            .handle(command(&item, "Edited", None))
            .await
            .unwrap();

        assert!(result.item.is_published());
        let snapshot = result.snapshot.unwrap();
        assert_eq!(snapshot.version_number().value(), 1);
        assert_eq!(snapshot.fields().title, "Original");
        assert_eq!(snapshot.created_by(), &author());
    }

    #[tokio::test]
    async fn stale_revision_is_a_conflict() {
        let fixture = fixture();
        let item = stored(&fixture, false).await;
        fixture
            .handler
            .handle(command(&item, "First", Some(0)))
            .await
            .unwrap();

        let err = fixture
            .handler
            .handle(command(&item, "Second", Some(0)))
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::Conflict(_)));
        let current = fixture.content.find_by_id(item.id()).await.unwrap().unwrap();
        assert_eq!(current.fields().title, "First");
    }

    #[tokio::test]
    async fn explicit_save_clears_autosaved_draft() {
        let fixture = fixture();
        let item = stored(&fixture, false).await;
        fixture
            .content
            .save_draft_snapshot(item.id(), "{\"title\":\"typing\"}")
            .await
            .unwrap();

        let result = fixture
            .handler
            .handle(command(&item, "Saved", None))
            .await
            .unwrap();

        assert_eq!(result.item.draft_snapshot(), None);
    }
}
