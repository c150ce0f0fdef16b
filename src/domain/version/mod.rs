//! Version archive domain.
//!
//! Snapshots are append-only. Numbering is assigned by the store inside a
//! single atomic step, never by the caller.

mod snapshot;

pub use snapshot::{NewVersion, VersionNumber, VersionSnapshot, VersionedFields};
