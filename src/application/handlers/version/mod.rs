//! Version archive command and query handlers.

mod create_version;
mod get_version;
mod list_versions;
mod restore_version;

pub use create_version::{CreateVersionCommand, CreateVersionHandler};
pub use get_version::{GetVersionHandler, GetVersionQuery};
pub use list_versions::{ListVersionsHandler, ListVersionsQuery};
pub use restore_version::{RestoreVersionCommand, RestoreVersionHandler, RestoreVersionResult};

use crate::domain::content::ContentItem;
use crate::domain::foundation::{AuthorId, DomainError};
use crate::domain::version::{NewVersion, VersionSnapshot};
use crate::ports::VersionRepository;

/// Archive the item's current authoritative fields under the next number.
///
/// Shared by every path that replaces live content: publish, edits of a
/// published item, and the scheduled publish worker.
pub(crate) async fn archive_live_fields(
    versions: &dyn VersionRepository,
    item: &ContentItem,
    created_by: AuthorId,
) -> Result<VersionSnapshot, DomainError> {
    let snapshot = versions
        .create_next(NewVersion {
            content_item_id: *item.id(),
            fields: item.versioned_fields(),
            created_by,
        })
        .await?;

    tracing::debug!(
        item_id = %item.id(),
        version_number = snapshot.version_number().value(),
        "Version snapshot created"
    );
    Ok(snapshot)
}
