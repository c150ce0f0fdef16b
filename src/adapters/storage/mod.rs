//! Local draft cache adapters.
//!
//! - `FileDraftCache` - YAML slot files in a directory
//! - `InMemoryDraftCache` - in-memory slots for tests

mod file_draft_cache;
mod in_memory_draft_cache;

pub use file_draft_cache::FileDraftCache;
pub use in_memory_draft_cache::InMemoryDraftCache;
