//! HTTP handlers for content and version endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{
    CancelScheduleCommand, CancelScheduleHandler, CreateContentItemCommand,
    CreateContentItemHandler, CreateVersionCommand, CreateVersionHandler,
    DeleteContentItemCommand, DeleteContentItemHandler, GetContentItemHandler,
    GetContentItemQuery, GetVersionHandler, GetVersionQuery, ListVersionsHandler,
    ListVersionsQuery, PublishContentItemCommand, PublishContentItemHandler,
    RestoreVersionCommand, RestoreVersionHandler, SaveDraftCommand, SaveDraftHandler,
    ScheduleContentItemCommand,
    ScheduleContentItemHandler, UnpublishContentItemCommand, UnpublishContentItemHandler,
    UpdateContentItemCommand, UpdateContentItemHandler,
};
use crate::domain::content::ContentItem;
use crate::domain::foundation::{AuthorId, ContentItemId, Timestamp};
use crate::domain::version::VersionNumber;
use crate::ports::{ContentRepository, VersionRepository};

use super::dto::{
    ContentCommandResponse, ContentItemResponse, CreateContentRequest, CreateVersionRequest,
    DeleteContentResponse, PublishContentRequest, RevisionRequest, SaveDraftRequest,
    SaveDraftResponse, ScheduleContentRequest, UpdateContentRequest, VersionListResponse,
    VersionResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct ContentAppState {
    pub content_repository: Arc<dyn ContentRepository>,
    pub version_repository: Arc<dyn VersionRepository>,
}

impl ContentAppState {
    pub fn new(
        content_repository: Arc<dyn ContentRepository>,
        version_repository: Arc<dyn VersionRepository>,
    ) -> Self {
        Self {
            content_repository,
            version_repository,
        }
    }

    pub fn create_handler(&self) -> CreateContentItemHandler {
        CreateContentItemHandler::new(self.content_repository.clone())
    }

    pub fn get_handler(&self) -> GetContentItemHandler {
        GetContentItemHandler::new(self.content_repository.clone())
    }

    pub fn update_handler(&self) -> UpdateContentItemHandler {
        UpdateContentItemHandler::new(
            self.content_repository.clone(),
            self.version_repository.clone(),
        )
    }

    pub fn publish_handler(&self) -> PublishContentItemHandler {
        PublishContentItemHandler::new(
            self.content_repository.clone(),
            self.version_repository.clone(),
        )
    }

    pub fn save_draft_handler(&self) -> SaveDraftHandler {
        SaveDraftHandler::new(self.content_repository.clone())
    }

    pub fn schedule_handler(&self) -> ScheduleContentItemHandler {
        ScheduleContentItemHandler::new(self.content_repository.clone())
    }

    pub fn cancel_schedule_handler(&self) -> CancelScheduleHandler {
        CancelScheduleHandler::new(self.content_repository.clone())
    }

    pub fn unpublish_handler(&self) -> UnpublishContentItemHandler {
        UnpublishContentItemHandler::new(self.content_repository.clone())
    }

    pub fn delete_handler(&self) -> DeleteContentItemHandler {
        DeleteContentItemHandler::new(
            self.content_repository.clone(),
            self.version_repository.clone(),
        )
    }

    pub fn create_version_handler(&self) -> CreateVersionHandler {
        CreateVersionHandler::new(
            self.content_repository.clone(),
            self.version_repository.clone(),
        )
    }

    pub fn list_versions_handler(&self) -> ListVersionsHandler {
        ListVersionsHandler::new(
            self.content_repository.clone(),
            self.version_repository.clone(),
        )
    }

    pub fn get_version_handler(&self) -> GetVersionHandler {
        GetVersionHandler::new(self.version_repository.clone())
    }

    pub fn restore_version_handler(&self) -> RestoreVersionHandler {
        RestoreVersionHandler::new(
            self.content_repository.clone(),
            self.version_repository.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Parsing helpers
// ════════════════════════════════════════════════════════════════════════════════

fn parse_item_id(raw: &str) -> Result<ContentItemId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid content item ID format"))
}

fn parse_version_number(raw: u32) -> Result<VersionNumber, ApiError> {
    VersionNumber::new(raw).map_err(|e| ApiError::bad_request(e.to_string()))
}

fn parse_actor(raw: Option<String>) -> Result<Option<AuthorId>, ApiError> {
    raw.map(|s| AuthorId::new(s).map_err(|e| ApiError::bad_request(e.to_string())))
        .transpose()
}

fn command_response(
    item: &ContentItem,
    message: impl Into<String>,
    snapshot_version: Option<VersionNumber>,
) -> ContentCommandResponse {
    ContentCommandResponse {
        item: ContentItemResponse::from(item),
        message: message.into(),
        snapshot_version: snapshot_version.map(|v| v.value()),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Content endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/content - Create a content item
pub async fn create_content(
    State(state): State<ContentAppState>,
    Json(request): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let author_id =
        AuthorId::new(request.author_id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let cmd = CreateContentItemCommand {
        author_id,
        fields: request.fields,
        publish: request.publish,
    };
    let result = state.create_handler().handle(cmd).await?;

    let message = if result.item.is_published() {
        "Content created and published"
    } else {
        "Content created"
    };
    Ok((
        StatusCode::CREATED,
        Json(command_response(&result.item, message, None)),
    ))
}

/// GET /api/content/:id - Fetch a content item
pub async fn get_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let item = state.get_handler().handle(GetContentItemQuery { item_id }).await?;
    Ok(Json(ContentItemResponse::from(&item)))
}

/// PUT /api/content/:id - Replace the live fields
pub async fn update_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    Json(request): Json<UpdateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = UpdateContentItemCommand {
        item_id: parse_item_id(&item_id)?,
        fields: request.fields,
        expected_revision: request.expected_revision,
        actor: parse_actor(request.actor)?,
    };
    let result = state.update_handler().handle(cmd).await?;

    let snapshot_version = result.snapshot.as_ref().map(|s| s.version_number());
    Ok(Json(command_response(
        &result.item,
        "Content updated",
        snapshot_version,
    )))
}

/// PUT /api/content/:id/draft - Autosave the editor buffer
pub async fn save_draft(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    Json(request): Json<SaveDraftRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let result = state
        .save_draft_handler()
        .handle(SaveDraftCommand {
            item_id,
            fields: request.fields,
        })
        .await?;

    let message = if result.saved {
        "Draft saved"
    } else {
        "Empty draft skipped"
    };
    Ok(Json(SaveDraftResponse {
        id: item_id.to_string(),
        saved: result.saved,
        message: message.to_string(),
    }))
}

/// DELETE /api/content/:id - Delete an item and its history
pub async fn delete_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let result = state
        .delete_handler()
        .handle(DeleteContentItemCommand { item_id })
        .await?;

    Ok(Json(DeleteContentResponse {
        id: item_id.to_string(),
        deleted_versions: result.deleted_versions,
        message: "Content deleted".to_string(),
    }))
}

/// POST /api/content/:id/publish - Publish immediately
pub async fn publish_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    request: Option<Json<PublishContentRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = PublishContentItemCommand {
        item_id: parse_item_id(&item_id)?,
        fields: request.fields,
        expected_revision: request.expected_revision,
        actor: parse_actor(request.actor)?,
    };
    let result = state.publish_handler().handle(cmd).await?;

    Ok(Json(command_response(
        &result.item,
        "Content published",
        Some(result.snapshot.version_number()),
    )))
}

/// POST /api/content/:id/schedule - Schedule a future publication
pub async fn schedule_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    Json(request): Json<ScheduleContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let cmd = ScheduleContentItemCommand {
        item_id: parse_item_id(&item_id)?,
        scheduled_at: Timestamp::from_datetime(request.scheduled_at),
        expected_revision: request.expected_revision,
    };
    let item = state.schedule_handler().handle(cmd).await?;

    let message = match item.scheduled_at() {
        Some(at) => format!("Content scheduled for {}", at),
        None => "Content scheduled".to_string(),
    };
    Ok(Json(command_response(&item, message, None)))
}

/// POST /api/content/:id/unschedule - Cancel a pending publication
pub async fn unschedule_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    request: Option<Json<RevisionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = CancelScheduleCommand {
        item_id: parse_item_id(&item_id)?,
        expected_revision: request.expected_revision,
    };
    let item = state.cancel_schedule_handler().handle(cmd).await?;
    Ok(Json(command_response(&item, "Schedule cancelled", None)))
}

/// POST /api/content/:id/unpublish - Return a published item to draft
pub async fn unpublish_content(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    request: Option<Json<RevisionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = UnpublishContentItemCommand {
        item_id: parse_item_id(&item_id)?,
        expected_revision: request.expected_revision,
    };
    let item = state.unpublish_handler().handle(cmd).await?;
    Ok(Json(command_response(&item, "Content unpublished", None)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Version endpoints
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/content/:id/versions - List snapshots, newest first
pub async fn list_versions(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let item_id = parse_item_id(&item_id)?;
    let versions = state
        .list_versions_handler()
        .handle(ListVersionsQuery { item_id })
        .await?;

    Ok(Json(VersionListResponse {
        content_item_id: item_id.to_string(),
        versions: versions.iter().map(VersionResponse::from).collect(),
    }))
}

/// POST /api/content/:id/versions - Archive a snapshot manually
pub async fn create_version(
    State(state): State<ContentAppState>,
    Path(item_id): Path<String>,
    request: Option<Json<CreateVersionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = CreateVersionCommand {
        item_id: parse_item_id(&item_id)?,
        fields: request.fields,
        created_by: parse_actor(request.created_by)?,
    };
    let snapshot = state.create_version_handler().handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(VersionResponse::from(&snapshot))))
}

/// GET /api/content/:id/versions/:number - Fetch one snapshot
pub async fn get_version(
    State(state): State<ContentAppState>,
    Path((item_id, number)): Path<(String, u32)>,
) -> Result<impl IntoResponse, ApiError> {
    let query = GetVersionQuery {
        item_id: parse_item_id(&item_id)?,
        version_number: parse_version_number(number)?,
    };
    let snapshot = state.get_version_handler().handle(query).await?;
    Ok(Json(VersionResponse::from(&snapshot)))
}

/// POST /api/content/:id/versions/:number/restore - Restore a snapshot
pub async fn restore_version(
    State(state): State<ContentAppState>,
    Path((item_id, number)): Path<(String, u32)>,
    request: Option<Json<RevisionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(request) = request.unwrap_or_default();
    let cmd = RestoreVersionCommand {
        item_id: parse_item_id(&item_id)?,
        version_number: parse_version_number(number)?,
        expected_revision: request.expected_revision,
    };
    let result = state.restore_version_handler().handle(cmd).await?;

    Ok(Json(command_response(
        &result.item,
        format!("Restored from version {}", result.restored_from),
        None,
    )))
}
