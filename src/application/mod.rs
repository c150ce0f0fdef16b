//! Application layer - Commands, Queries, Handlers and the autosave engine.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod autosave;
pub mod handlers;

pub use autosave::{AutosaveError, AutosaveOptions, AutosaveSession, AutosaveStatus, SaveOutcome};
pub use handlers::*;
