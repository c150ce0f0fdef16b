//! HTTP adapters - REST API implementations.
//!
//! Each module has its own state type and router; [`api_router`] merges
//! them into the application router.

pub mod content;
pub mod error;
pub mod publishing;

use axum::Router;

pub use content::{content_router, ContentAppState};
pub use error::{ApiError, ErrorResponse};
pub use publishing::{publishing_router, PublishingAppState};

/// Builds the full API router with state applied.
pub fn api_router(content: ContentAppState, publishing: PublishingAppState) -> Router {
    content_router()
        .with_state(content)
        .merge(publishing_router().with_state(publishing))
}
