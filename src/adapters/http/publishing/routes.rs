//! Route configuration for the publishing trigger.

use axum::routing::post;
use axum::Router;

use super::handlers::{run_scheduled_publish, PublishingAppState};

/// Creates the publishing router.
pub fn publishing_router() -> Router<PublishingAppState> {
    Router::new().route("/api/scheduled-publish", post(run_scheduled_publish))
}
