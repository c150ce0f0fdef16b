//! Immutable version snapshots of a content item's authoritative fields.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::content::ContentFields;
use crate::domain::foundation::{AuthorId, ContentItemId, ValidationError, Timestamp, VersionId};

/// Per-item version number. Starts at 1 and only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionNumber(u32);

impl VersionNumber {
    /// The number assigned to the first snapshot of an item.
    pub const FIRST: VersionNumber = VersionNumber(1);

    /// Creates a version number, rejecting zero.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::out_of_range(
                "version_number",
                1,
                u32::MAX as i64,
                0,
            ));
        }
        Ok(Self(value))
    }

    /// Number that follows the current maximum (`None` when no versions exist).
    pub fn next_after(current_max: Option<VersionNumber>) -> Self {
        match current_max {
            Some(VersionNumber(n)) => VersionNumber(n + 1),
            None => Self::FIRST,
        }
    }

    /// Returns the raw value.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// The subset of item fields preserved by a snapshot.
///
/// The slug is deliberately absent: restoring an old revision must not move
/// the item's URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionedFields {
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub read_time: Option<u32>,
}

impl From<&ContentFields> for VersionedFields {
    fn from(fields: &ContentFields) -> Self {
        Self {
            title: fields.title.clone(),
            body: fields.body.clone(),
            excerpt: fields.excerpt.clone(),
            category: fields.category.clone(),
            cover_image: fields.cover_image.clone(),
            read_time: fields.read_time,
        }
    }
}

impl VersionedFields {
    /// Copies these fields over a live field set, keeping its slug.
    pub fn apply_to(&self, live: &ContentFields) -> ContentFields {
        ContentFields {
            title: self.title.clone(),
            slug: live.slug.clone(),
            excerpt: self.excerpt.clone(),
            body: self.body.clone(),
            category: self.category.clone(),
            cover_image: self.cover_image.clone(),
            read_time: self.read_time,
        }
    }
}

/// Request to archive a new snapshot. The number is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVersion {
    pub content_item_id: ContentItemId,
    pub fields: VersionedFields,
    pub created_by: AuthorId,
}

/// An archived, immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionSnapshot {
    id: VersionId,
    content_item_id: ContentItemId,
    version_number: VersionNumber,
    fields: VersionedFields,
    created_at: Timestamp,
    created_by: AuthorId,
}

impl VersionSnapshot {
    /// Materializes a snapshot once the store has assigned its number.
    pub fn from_new(new: NewVersion, version_number: VersionNumber, created_at: Timestamp) -> Self {
        Self {
            id: VersionId::new(),
            content_item_id: new.content_item_id,
            version_number,
            fields: new.fields,
            created_at,
            created_by: new.created_by,
        }
    }

    /// Reconstitute a snapshot from persistence.
    pub fn reconstitute(
        id: VersionId,
        content_item_id: ContentItemId,
        version_number: VersionNumber,
        fields: VersionedFields,
        created_at: Timestamp,
        created_by: AuthorId,
    ) -> Self {
        Self {
            id,
            content_item_id,
            version_number,
            fields,
            created_at,
            created_by,
        }
    }

    pub fn id(&self) -> &VersionId {
        &self.id
    }

    pub fn content_item_id(&self) -> &ContentItemId {
        &self.content_item_id
    }

    pub fn version_number(&self) -> VersionNumber {
        self.version_number
    }

    pub fn fields(&self) -> &VersionedFields {
        &self.fields
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn created_by(&self) -> &AuthorId {
        &self.created_by
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_numbers_start_at_one() {
        assert_eq!(VersionNumber::next_after(None), VersionNumber::FIRST);
        assert_eq!(
            VersionNumber::next_after(Some(VersionNumber::new(7).unwrap())).value(),
            8
        );
    }

    #[test]
    fn version_number_zero_is_invalid() {
        assert!(VersionNumber::new(0).is_err());
    }

    #[test]
    fn apply_to_keeps_live_slug() {
        let live = ContentFields {
            title: "Now".to_string(),
            slug: "stable-url".to_string(),
            body: "current".to_string(),
            ..Default::default()
        };
        let old = VersionedFields {
            title: "Then".to_string(),
            body: "older".to_string(),
            read_time: Some(3),
            ..Default::default()
        };

        let restored = old.apply_to(&live);
        assert_eq!(restored.slug, "stable-url");
        assert_eq!(restored.title, "Then");
        assert_eq!(restored.read_time, Some(3));
        assert_eq!(VersionedFields::from(&restored), old);
    }
}
