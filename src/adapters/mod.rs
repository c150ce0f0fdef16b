//! Adapters - Implementations of port interfaces.
//!
//! - `http` - REST endpoints (axum)
//! - `memory` - In-memory repositories for tests and database-less runs
//! - `postgres` - PostgreSQL repositories (sqlx)
//! - `scheduler` - Background runner for scheduled publishing
//! - `storage` - Local draft cache implementations

pub mod http;
pub mod memory;
pub mod postgres;
pub mod scheduler;
pub mod storage;

pub use memory::{InMemoryContentRepository, InMemoryVersionRepository};
pub use postgres::{PostgresContentRepository, PostgresVersionRepository};
pub use scheduler::{ScheduledPublishRunner, ScheduledPublishRunnerConfig};
pub use storage::{FileDraftCache, InMemoryDraftCache};
