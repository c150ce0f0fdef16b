//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a content item in the authoritative store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentItemId(Uuid);

impl ContentItemId {
    /// Creates a new random ContentItemId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ContentItemId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ContentItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ContentItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ContentItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a version snapshot row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionId(Uuid);

impl VersionId {
    /// Creates a new random VersionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a VersionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for VersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of whoever authored an item or triggered a snapshot.
///
/// Authentication is handled upstream; this is an opaque, non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthorId(String);

impl AuthorId {
    /// Creates a new AuthorId, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("author_id"));
        }
        Ok(Self(id))
    }

    /// Author recorded for transitions performed by the scheduled publish worker.
    pub fn scheduler() -> Self {
        Self("scheduler".to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Key of the single local draft slot on a device.
///
/// Only one unsaved "new item" draft exists per device, so the key is fixed
/// unless a caller deliberately namespaces it (e.g. per profile).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalDraftKey(String);

impl LocalDraftKey {
    /// The fixed slot used for new, never-saved items.
    pub const NEW_ITEM: &'static str = "new-item-draft";

    /// Returns the default single-slot key.
    pub fn new_item() -> Self {
        Self(Self::NEW_ITEM.to_string())
    }

    /// Creates a namespaced key.
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.is_empty() {
            return Err(ValidationError::empty_field("local_draft_key"));
        }
        if key.contains(|c: char| c == '/' || c == '\\') || key.starts_with('.') {
            return Err(ValidationError::invalid_format(
                "local_draft_key",
                "must be a plain file-safe name",
            ));
        }
        Ok(Self(key))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LocalDraftKey {
    fn default() -> Self {
        Self::new_item()
    }
}

impl fmt::Display for LocalDraftKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_item_id_round_trips_through_string() {
        let id = ContentItemId::new();
        let parsed: ContentItemId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn content_item_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ContentItemId>().is_err());
    }

    #[test]
    fn content_item_id_serializes_transparently() {
        let uuid = Uuid::new_v4();
        let id = ContentItemId::from_uuid(uuid);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", uuid));
    }

    #[test]
    fn author_id_rejects_blank() {
        assert!(AuthorId::new("").is_err());
        assert!(AuthorId::new("   ").is_err());
        assert_eq!(AuthorId::new("alice").unwrap().as_str(), "alice");
    }

    #[test]
    fn local_draft_key_defaults_to_fixed_slot() {
        assert_eq!(LocalDraftKey::default().as_str(), LocalDraftKey::NEW_ITEM);
    }

    #[test]
    fn local_draft_key_rejects_path_segments() {
        assert!(LocalDraftKey::new("../escape").is_err());
        assert!(LocalDraftKey::new("a/b").is_err());
        assert!(LocalDraftKey::new("profile-2").is_ok());
    }
}
