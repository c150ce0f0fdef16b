//! In-memory repositories for tests and database-less development.

mod content_repository;
mod version_repository;

pub use content_repository::InMemoryContentRepository;
pub use version_repository::InMemoryVersionRepository;
