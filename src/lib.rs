//! Content Lifecycle Manager
//!
//! Keeps in-progress edits safe through debounced autosave, archives an
//! immutable snapshot of every published revision, and flips scheduled
//! content to published once its time arrives.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
