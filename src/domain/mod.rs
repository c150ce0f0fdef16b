//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `content` - Content item aggregate and its publication state machine
//! - `version` - Immutable version snapshots
//! - `draft` - Draft storage targets and the local draft slot

pub mod content;
pub mod draft;
pub mod foundation;
pub mod version;
