//! Per-device draft slot entry.

use serde::{Deserialize, Serialize};

use crate::domain::content::ContentFields;
use crate::domain::foundation::Timestamp;

/// Contents of the single local draft slot: a field set without an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalDraftEntry {
    pub fields: ContentFields,
    pub last_local_save_at: Timestamp,
}

impl LocalDraftEntry {
    pub fn new(fields: ContentFields, last_local_save_at: Timestamp) -> Self {
        Self {
            fields,
            last_local_save_at,
        }
    }
}
