//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ContentRepository` - Authoritative store for content items
//! - `VersionRepository` - Append-only version archive
//! - `LocalDraftCache` - Per-device slot for drafts without a remote id

mod content_repository;
mod draft_cache;
mod version_repository;

pub use content_repository::ContentRepository;
pub use draft_cache::{DraftCacheError, LocalDraftCache};
pub use version_repository::VersionRepository;
