//! HTTP trigger for the scheduled publish worker.
//!
//! `POST /api/scheduled-publish` runs one pass immediately, the same pass the
//! background runner performs on its interval. Useful for external cron.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::PublishingAppState;
pub use routes::publishing_router;
