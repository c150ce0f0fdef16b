//! Route configuration for content endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    create_content, create_version, delete_content, get_content, get_version, list_versions,
    publish_content, restore_version, save_draft, schedule_content, unpublish_content,
    unschedule_content, update_content, ContentAppState,
};

/// Creates the content router with all endpoints.
pub fn content_router() -> Router<ContentAppState> {
    Router::new()
        .route("/api/content", post(create_content))
        .route(
            "/api/content/:id",
            get(get_content).put(update_content).delete(delete_content),
        )
        .route("/api/content/:id/draft", put(save_draft))
        .route("/api/content/:id/publish", post(publish_content))
        .route("/api/content/:id/schedule", post(schedule_content))
        .route("/api/content/:id/unschedule", post(unschedule_content))
        .route("/api/content/:id/unpublish", post(unpublish_content))
        .route(
            "/api/content/:id/versions",
            get(list_versions).post(create_version),
        )
        .route("/api/content/:id/versions/:number", get(get_version))
        .route(
            "/api/content/:id/versions/:number/restore",
            post(restore_version),
        )
}
