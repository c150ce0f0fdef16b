//! HTTP handler for the scheduled publish trigger.

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{PublishDueItemsCommand, PublishDueItemsHandler};

use super::dto::PublishRunResponse;

/// State for the publishing routes.
#[derive(Clone)]
pub struct PublishingAppState {
    pub handler: Arc<PublishDueItemsHandler>,
}

impl PublishingAppState {
    pub fn new(handler: Arc<PublishDueItemsHandler>) -> Self {
        Self { handler }
    }
}

/// POST /api/scheduled-publish - Publish every item whose time has come
pub async fn run_scheduled_publish(
    State(state): State<PublishingAppState>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state.handler.handle(PublishDueItemsCommand::now()).await?;
    Ok(Json(PublishRunResponse::from(&summary)))
}
