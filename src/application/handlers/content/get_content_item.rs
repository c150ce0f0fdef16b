//! GetContentItemHandler - Query handler for a single item.

use std::sync::Arc;

use crate::domain::content::{ContentError, ContentItem};
use crate::domain::foundation::ContentItemId;
use crate::ports::ContentRepository;

/// Query to get a content item by ID.
#[derive(Debug, Clone)]
pub struct GetContentItemQuery {
    pub item_id: ContentItemId,
}

/// Handler for retrieving a content item.
pub struct GetContentItemHandler {
    content: Arc<dyn ContentRepository>,
}

impl GetContentItemHandler {
    pub fn new(content: Arc<dyn ContentRepository>) -> Self {
        Self { content }
    }

    pub async fn handle(&self, query: GetContentItemQuery) -> Result<ContentItem, ContentError> {
        self.content
            .find_by_id(&query.item_id)
            .await?
            .ok_or_else(|| ContentError::not_found(query.item_id))
    }
}
