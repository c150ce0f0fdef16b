//! Draft domain: the dual-store model used by autosave.

mod local_draft;
mod target;

pub use local_draft::LocalDraftEntry;
pub use target::DraftTarget;
