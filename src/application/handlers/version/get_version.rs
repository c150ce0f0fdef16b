//! GetVersionHandler - preview a single snapshot before restoring it.

use std::sync::Arc;

use crate::domain::content::ContentError;
use crate::domain::foundation::ContentItemId;
use crate::domain::version::{VersionNumber, VersionSnapshot};
use crate::ports::VersionRepository;

/// Query for one version of an item.
#[derive(Debug, Clone)]
pub struct GetVersionQuery {
    pub item_id: ContentItemId,
    pub version_number: VersionNumber,
}

/// Handler for fetching a version.
pub struct GetVersionHandler {
    versions: Arc<dyn VersionRepository>,
}

impl GetVersionHandler {
    pub fn new(versions: Arc<dyn VersionRepository>) -> Self {
        Self { versions }
    }

    pub async fn handle(&self, query: GetVersionQuery) -> Result<VersionSnapshot, ContentError> {
        self.versions
            .find(&query.item_id, query.version_number)
            .await?
            .ok_or_else(|| ContentError::version_not_found(query.item_id, query.version_number))
    }
}
