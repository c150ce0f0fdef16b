//! Scheduled publish worker.

mod publish_due_items;

pub use publish_due_items::{PublishDueItemsCommand, PublishDueItemsHandler, PublishRunSummary};
