//! CreateContentItemHandler - first explicit save of a new item.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentFields, ContentItem};
use crate::domain::foundation::{AuthorId, ContentItemId, Timestamp};
use crate::ports::ContentRepository;

/// Command to create a content item.
#[derive(Debug, Clone)]
pub struct CreateContentItemCommand {
    pub author_id: AuthorId,
    pub fields: ContentFields,
    /// Publish in the same write instead of creating a draft.
    pub publish: bool,
}

/// Result of successful creation.
#[derive(Debug, Clone)]
pub struct CreateContentItemResult {
    pub item: ContentItem,
}

/// Handler for creating content items.
pub struct CreateContentItemHandler {
    content: Arc<dyn ContentRepository>,
}

impl CreateContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    pub async fn handle(
        &self,
        cmd: CreateContentItemCommand,
    ) -> Result<CreateContentItemResult, ContentError> {
        let mut item = ContentItem::new(ContentItemId::new(), cmd.author_id, cmd.fields)?;

        // Nothing existed before, so there is nothing to snapshot
        if cmd.publish {
            item.publish_now(None, Timestamp::now())?;
        }

        self.content.save(&item).await?;

        tracing::info!(item_id = %item.id(), status = ?item.status(), "Content item created");
        Ok(CreateContentItemResult { item })
    }
}
