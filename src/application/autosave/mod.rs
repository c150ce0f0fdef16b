//! Autosave engine.
//!
//! One [`AutosaveSession`] per open editor. Edits reset a quiescence timer;
//! when it fires the buffer is written to the item's draft field or to the
//! local draft slot, depending on the session's [`DraftTarget`].
//!
//! [`DraftTarget`]: crate::domain::draft::DraftTarget

mod error;
mod session;

pub use error::AutosaveError;
pub use session::{AutosaveOptions, AutosaveSession, AutosaveStatus, SaveOutcome};
