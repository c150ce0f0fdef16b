//! ListVersionsHandler - an item's history, newest first.

use std::sync::Arc;

use crate::domain::content::ContentError;
use crate::domain::foundation::ContentItemId;
use crate::domain::version::VersionSnapshot;
use crate::ports::{ContentRepository, VersionRepository};

/// Query for an item's versions.
#[derive(Debug, Clone)]
pub struct ListVersionsQuery {
    pub item_id: ContentItemId,
}

/// Handler for listing versions.
pub struct ListVersionsHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
}

impl ListVersionsHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self { content, versions }
    }

    pub async fn handle(&self, query: ListVersionsQuery) -> Result<Vec<VersionSnapshot>, ContentError> {
        if self.content.find_by_id(&query.item_id).await?.is_none() {
            return Err(ContentError::not_found(query.item_id));
        }

        Ok(self.versions.list_for_item(&query.item_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryContentRepository, InMemoryVersionRepository};
    use crate::domain::content::{ContentFields, ContentItem};
    use crate::domain::foundation::AuthorId;
    use crate::domain::version::NewVersion;

    #[tokio::test]
    async fn lists_newest_first() {
        let content = Arc::new(InMemoryContentRepository::new());
        let versions = Arc::new(InMemoryVersionRepository::new());
        let item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("author-1").unwrap(),
            ContentFields::with_title_and_body("Live", "Body"),
        )
        .unwrap();
        content.save(&item).await.unwrap();
        for _ in 0..3 {
            versions
                .create_next(NewVersion {
                    content_item_id: *item.id(),
                    fields: item.versioned_fields(),
                    created_by: item.author_id().clone(),
                })
                .await
                .unwrap();
        }
        let handler = ListVersionsHandler::new(content, versions);

        let listed = handler
            .handle(ListVersionsQuery { item_id: *item.id() })
            .await
            .unwrap();

        let numbers: Vec<u32> = listed.iter().map(|v| v.version_number().value()).collect();
        assert_eq!(numbers, vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn unknown_item_is_not_found() {
        let handler = ListVersionsHandler::new(
            Arc::new(InMemoryContentRepository::new()),
            Arc::new(InMemoryVersionRepository::new()),
        );

        let err = handler
            .handle(ListVersionsQuery {
                item_id: ContentItemId::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContentError::NotFound(_)));
    }
}
