//! Where an editing session's drafts go.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{ContentItemId, LocalDraftKey};

/// Storage target of an autosave session.
///
/// An item without a remote identity can only live in the per-device slot;
/// once the store has assigned an id, the item's `draft_snapshot` column is
/// the sole authoritative draft.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "key", rename_all = "lowercase")]
pub enum DraftTarget {
    Unsaved(LocalDraftKey),
    Persisted(ContentItemId),
}

impl DraftTarget {
    /// Target for a brand-new item in the default local slot.
    pub fn new_item() -> Self {
        DraftTarget::Unsaved(LocalDraftKey::new_item())
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, DraftTarget::Persisted(_))
    }

    pub fn remote_id(&self) -> Option<ContentItemId> {
        match self {
            DraftTarget::Persisted(id) => Some(*id),
            DraftTarget::Unsaved(_) => None,
        }
    }

    pub fn local_key(&self) -> Option<&LocalDraftKey> {
        match self {
            DraftTarget::Unsaved(key) => Some(key),
            DraftTarget::Persisted(_) => None,
        }
    }
}

impl fmt::Display for DraftTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftTarget::Unsaved(key) => write!(f, "local:{}", key),
            DraftTarget::Persisted(id) => write!(f, "remote:{}", id),
        }
    }
}
