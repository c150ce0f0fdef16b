//! Version archive port.

use crate::domain::foundation::{ContentItemId, DomainError};
use crate::domain::version::{NewVersion, VersionNumber, VersionSnapshot};
use async_trait::async_trait;

/// Repository port for immutable version snapshots.
///
/// Implementations must assign `max + 1` and insert in one atomic step:
/// two concurrent `create_next` calls for the same item never receive the
/// same number.
#[async_trait]
pub trait VersionRepository: Send + Sync {
    /// Archive a snapshot under the next version number for its item.
    ///
    /// # Errors
    ///
    /// - `ContentItemNotFound` if the item doesn't exist (where enforced)
    /// - `DatabaseError` on persistence failure
    async fn create_next(&self, version: NewVersion) -> Result<VersionSnapshot, DomainError>;

    /// All snapshots of an item, newest first.
    async fn list_for_item(&self, item_id: &ContentItemId)
        -> Result<Vec<VersionSnapshot>, DomainError>;

    /// A single snapshot by number.
    async fn find(
        &self,
        item_id: &ContentItemId,
        version: VersionNumber,
    ) -> Result<Option<VersionSnapshot>, DomainError>;

    /// Removes every snapshot of an item. Only the item-delete cascade calls
    /// this; versions are otherwise never deleted.
    async fn delete_all_for_item(&self, item_id: &ContentItemId) -> Result<u64, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn VersionRepository) {}
    }
}
