//! SaveDraftHandler - autosave a remote editor's buffer into an item's draft field.
//!
//! Draft writes are update-only and last-write-wins: no revision check, no
//! revision bump, and the live fields are untouched.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentFields};
use crate::domain::foundation::{ContentItemId, ErrorCode};
use crate::ports::ContentRepository;

/// Command to store an autosaved draft.
#[derive(Debug, Clone)]
pub struct SaveDraftCommand {
    pub item_id: ContentItemId,
    pub fields: ContentFields,
}

/// Result of a draft write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveDraftResult {
    /// False when the buffer was blank and nothing was written.
    pub saved: bool,
}

/// Handler for autosaved drafts.
pub struct SaveDraftHandler {
    content: Arc<dyn ContentRepository>,
}

impl SaveDraftHandler {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    pub async fn handle(&self, cmd: SaveDraftCommand) -> Result<SaveDraftResult, ContentError> {
        if cmd.fields.is_blank() {
            return Ok(SaveDraftResult { saved: false });
        }

        let snapshot = cmd
            .fields
            .to_snapshot()
            .map_err(|e| ContentError::infrastructure(e.to_string()))?;
        self.content
            .save_draft_snapshot(&cmd.item_id, &snapshot)
            .await
            .map_err(|e| match e.code {
                ErrorCode::ContentItemNotFound => ContentError::not_found(cmd.item_id),
                _ => ContentError::from(e),
            })?;

        tracing::debug!(item_id = %cmd.item_id, "Draft autosaved");
        Ok(SaveDraftResult { saved: true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryContentRepository;
    use crate::domain::content::ContentItem;
    use crate::domain::foundation::AuthorId;

    async fn stored_item(repo: &InMemoryContentRepository) -> ContentItem {
        let item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("author-1").unwrap(),
            ContentFields::with_title_and_body("Live", "Body"),
        )
        .unwrap();
        repo.save(&item).await.unwrap();
        item
    }

    #[tokio::test]
    async fn draft_is_stored_without_touching_live_fields_or_revision() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let item = stored_item(&repo).await;
        let handler = SaveDraftHandler::new(repo.clone());
        let draft = ContentFields::with_title_and_body("Half typed", "Bo");

        let result = handler
            .handle(SaveDraftCommand {
                item_id: *item.id(),
                fields: draft.clone(),
            })
            .await
            .unwrap();

        assert!(result.saved);
        let stored = repo.find_by_id(item.id()).await.unwrap().unwrap();
        assert_eq!(stored.fields().title, "Live");
        assert_eq!(stored.revision(), 0);
        assert_eq!(
            ContentFields::from_snapshot(stored.draft_snapshot().unwrap()).unwrap(),
            draft
        );
    }

    #[tokio::test]
    async fn blank_buffer_is_skipped() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let item = stored_item(&repo).await;
        let writes = repo.write_count();
        let handler = SaveDraftHandler::new(repo.clone());

        let result = handler
            .handle(SaveDraftCommand {
                item_id: *item.id(),
                fields: ContentFields::default(),
            })
            .await
            .unwrap();

        assert!(!result.saved);
        assert_eq!(repo.write_count(), writes);
    }

    #[tokio::test]
    async fn draft_for_missing_item_is_not_found_and_creates_nothing() {
        let repo = Arc::new(InMemoryContentRepository::new());
        let handler = SaveDraftHandler::new(repo.clone());
        let item_id = ContentItemId::new();

        let err = handler
            .handle(SaveDraftCommand {
                item_id,
                fields: ContentFields::with_title_and_body("Orphan", "Body"),
            })
            .await
            .unwrap_err();

        assert_eq!(err, ContentError::NotFound(item_id));
        assert!(repo.is_empty().await);
    }
}
