//! HTTP DTOs for content and version endpoints.
//!
//! Field names are camelCase on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::content::{ContentFields, ContentItem, PublicationStatus};
use crate::domain::version::{VersionSnapshot, VersionedFields};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a content item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContentRequest {
    pub author_id: String,
    #[serde(flatten)]
    pub fields: ContentFields,
    #[serde(default)]
    pub publish: bool,
}

/// Request to replace an item's live fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContentRequest {
    #[serde(flatten)]
    pub fields: ContentFields,
    #[serde(default)]
    pub expected_revision: Option<u64>,
    #[serde(default)]
    pub actor: Option<String>,
}

/// Request to publish now, optionally with new fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishContentRequest {
    #[serde(default)]
    pub fields: Option<ContentFields>,
    #[serde(default)]
    pub expected_revision: Option<u64>,
    #[serde(default)]
    pub actor: Option<String>,
}

/// Autosaved editor buffer for an existing item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftRequest {
    #[serde(flatten)]
    pub fields: ContentFields,
}

/// Request to schedule publication.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleContentRequest {
    pub scheduled_at: DateTime<Utc>,
    #[serde(default)]
    pub expected_revision: Option<u64>,
}

/// Body for commands that only carry a revision token.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionRequest {
    #[serde(default)]
    pub expected_revision: Option<u64>,
}

/// Request to archive a snapshot manually.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVersionRequest {
    #[serde(default)]
    pub fields: Option<VersionedFields>,
    #[serde(default)]
    pub created_by: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Full content item view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemResponse {
    pub id: String,
    pub author_id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub body: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub read_time: Option<u32>,
    pub status: PublicationStatus,
    pub published: bool,
    pub published_at: Option<String>,
    pub scheduled_at: Option<String>,
    pub draft_snapshot: Option<String>,
    pub revision: u64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&ContentItem> for ContentItemResponse {
    fn from(item: &ContentItem) -> Self {
        let fields = item.fields();
        Self {
            id: item.id().to_string(),
            author_id: item.author_id().to_string(),
            title: fields.title.clone(),
            slug: fields.slug.clone(),
            excerpt: fields.excerpt.clone(),
            body: fields.body.clone(),
            category: fields.category.clone(),
            cover_image: fields.cover_image.clone(),
            read_time: fields.read_time,
            status: item.status(),
            published: item.is_published(),
            published_at: item.published_at().map(|t| t.to_rfc3339()),
            scheduled_at: item.scheduled_at().map(|t| t.to_rfc3339()),
            draft_snapshot: item.draft_snapshot().map(str::to_string),
            revision: item.revision(),
            created_at: item.created_at().to_rfc3339(),
            updated_at: item.updated_at().to_rfc3339(),
        }
    }
}

/// Response for content commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentCommandResponse {
    pub item: ContentItemResponse,
    pub message: String,
    /// Number of the snapshot taken before the change, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_version: Option<u32>,
}

/// Response for a draft write.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftResponse {
    pub id: String,
    pub saved: bool,
    pub message: String,
}

/// Response for a delete.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContentResponse {
    pub id: String,
    pub deleted_versions: u64,
    pub message: String,
}

/// Version snapshot view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionResponse {
    pub id: String,
    pub content_item_id: String,
    pub version_number: u32,
    pub title: String,
    pub body: String,
    pub excerpt: String,
    pub category: String,
    pub cover_image: Option<String>,
    pub read_time: Option<u32>,
    pub created_at: String,
    pub created_by: String,
}

impl From<&VersionSnapshot> for VersionResponse {
    fn from(snapshot: &VersionSnapshot) -> Self {
        let fields = snapshot.fields();
        Self {
            id: snapshot.id().to_string(),
            content_item_id: snapshot.content_item_id().to_string(),
            version_number: snapshot.version_number().value(),
            title: fields.title.clone(),
            body: fields.body.clone(),
            excerpt: fields.excerpt.clone(),
            category: fields.category.clone(),
            cover_image: fields.cover_image.clone(),
            read_time: fields.read_time,
            created_at: snapshot.created_at().to_rfc3339(),
            created_by: snapshot.created_by().to_string(),
        }
    }
}

/// Version history of one item, newest first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionListResponse {
    pub content_item_id: String,
    pub versions: Vec<VersionResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{AuthorId, ContentItemId};

    #[test]
    fn create_request_flattens_fields() {
        let json = r#"{"authorId": "a-1", "title": "Hello", "body": "World", "readTime": 4}"#;
        let req: CreateContentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.author_id, "a-1");
        assert_eq!(req.fields.title, "Hello");
        assert_eq!(req.fields.read_time, Some(4));
        assert!(!req.publish);
    }

    #[test]
    fn update_request_reads_revision() {
        let json = r#"{"title": "T", "expectedRevision": 3}"#;
        let req: UpdateContentRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.expected_revision, Some(3));
        assert!(req.actor.is_none());
    }

    #[test]
    fn empty_object_is_a_valid_publish_request() {
        let req: PublishContentRequest = serde_json::from_str("{}").unwrap();
        assert!(req.fields.is_none());
        assert!(req.expected_revision.is_none());
    }

    #[test]
    fn item_response_uses_camel_case() {
        let item = ContentItem::new(
            ContentItemId::new(),
            AuthorId::new("a-1").unwrap(),
            ContentFields::with_title_and_body("Hello", "World"),
        )
        .unwrap();
        let json = serde_json::to_value(ContentItemResponse::from(&item)).unwrap();
        assert_eq!(json["authorId"], "a-1");
        assert_eq!(json["status"], "draft");
        assert_eq!(json["published"], false);
        assert!(json["scheduledAt"].is_null());
    }
}
