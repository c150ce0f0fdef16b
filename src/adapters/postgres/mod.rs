//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresContentRepository` - Content items with revision-guarded writes
//! - `PostgresVersionRepository` - Append-only version archive

mod content_repository;
mod version_repository;

pub use content_repository::PostgresContentRepository;
pub use version_repository::PostgresVersionRepository;
