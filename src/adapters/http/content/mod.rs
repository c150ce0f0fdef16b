//! HTTP adapter for content items and their version history.
//!
//! # Endpoints
//!
//! - `POST /api/content` - Create an item (optionally publishing it)
//! - `GET|PUT|DELETE /api/content/:id` - Read, replace or delete an item
//! - `PUT /api/content/:id/draft` - Autosave the editor buffer (no revision bump)
//! - `POST /api/content/:id/{publish,schedule,unschedule,unpublish}` - Lifecycle transitions
//! - `GET|POST /api/content/:id/versions` - List or manually archive snapshots
//! - `GET /api/content/:id/versions/:number` - Read one snapshot
//! - `POST /api/content/:id/versions/:number/restore` - Restore a snapshot into the live item

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::ContentAppState;
pub use routes::content_router;
