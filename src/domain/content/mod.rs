//! Content domain module.
//!
//! A content item moves between draft, scheduled and published:
//!
//! ```text
//! draft --schedule(t)--> scheduled --(t elapsed, worker)--> published
//! draft --publish(now)--> published
//! scheduled --cancel--> draft
//! published --unpublish--> draft
//! ```

mod errors;
mod fields;
mod item;
mod status;

pub use errors::ContentError;
pub use fields::{slugify, ContentFields, MAX_EXCERPT_LENGTH, MAX_SLUG_LENGTH, MAX_TITLE_LENGTH};
pub use item::ContentItem;
pub use status::{Publication, PublicationStatus};
