//! PublishDueItemsHandler - one invocation of the scheduled publish worker.
//!
//! Selects every due item and flips each one with a conditional update.
//! Each flip is preceded by a snapshot of the item's pre-publish fields,
//! unless the newest snapshot already holds exactly those fields.
//!
//! ## Idempotence
//!
//! A successful flip clears `scheduled_at`, so a repeated or concurrent run
//! finds nothing to do. A run that loses the race for an item sees the
//! conditional update match no row and reports nothing for it; the snapshot
//! it took just before remains in the archive.
//!
//! ## Failure isolation
//!
//! Errors for one item are collected and the run moves on. The failed item
//! is still due and is retried by the next run; the snapshot it already got
//! is reused rather than archived again.

use std::sync::Arc;

use crate::application::handlers::version::archive_live_fields;
use crate::domain::content::{ContentError, ContentItem};
use crate::domain::foundation::{AuthorId, ContentItemId, DomainError, Timestamp};
use crate::ports::{ContentRepository, VersionRepository};

/// Command to run the worker once.
#[derive(Debug, Clone, Copy)]
pub struct PublishDueItemsCommand {
    /// Items scheduled at or before this instant are due.
    pub now: Timestamp,
}

impl PublishDueItemsCommand {
    pub fn now() -> Self {
        Self {
            now: Timestamp::now(),
        }
    }
}

/// Outcome of one worker run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishRunSummary {
    pub published_ids: Vec<ContentItemId>,
    pub errors: Vec<String>,
}

impl PublishRunSummary {
    pub fn count(&self) -> usize {
        self.published_ids.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Human-readable one-liner for the HTTP response and logs.
    pub fn message(&self) -> String {
        match (self.count(), self.errors.len()) {
            (0, 0) => "No scheduled content due for publishing".to_string(),
            (n, 0) => format!("Published {} scheduled item(s)", n),
            (n, e) => format!("Published {} scheduled item(s), {} failed", n, e),
        }
    }
}

/// Handler for the scheduled publish worker.
pub struct PublishDueItemsHandler {
    content: Arc<dyn ContentRepository>,
    versions: Arc<dyn VersionRepository>,
    actor: AuthorId,
}

impl PublishDueItemsHandler {
    pub fn new(content: Arc<dyn ContentRepository>, versions: Arc<dyn VersionRepository>) -> Self {
        Self {
            content,
            versions,
            actor: AuthorId::scheduler(),
        }
    }

    /// Record snapshots under a different author than the default scheduler.
    pub fn with_actor(mut self, actor: AuthorId) -> Self {
        self.actor = actor;
        self
    }

    /// Run once.
    ///
    /// # Errors
    ///
    /// Only the initial due-item query can fail the whole run; per-item
    /// failures end up in [`PublishRunSummary::errors`].
    pub async fn handle(
        &self,
        cmd: PublishDueItemsCommand,
    ) -> Result<PublishRunSummary, ContentError> {
        let due = self.content.find_due_scheduled(cmd.now).await?;
        let mut summary = PublishRunSummary::default();

        for item in due {
            match self.publish_one(&item, cmd.now).await {
                Ok(Some(published_at)) => {
                    tracing::info!(
                        item_id = %item.id(),
                        published_at = %published_at,
                        "Scheduled content item published"
                    );
                    summary.published_ids.push(*item.id());
                }
                Ok(None) => {
                    tracing::debug!(item_id = %item.id(), "Item no longer due, skipped");
                }
                Err(e) => {
                    tracing::warn!(item_id = %item.id(), error = %e, "Failed to publish scheduled item");
                    summary.errors.push(format!("{}: {}", item.id(), e));
                }
            }
        }

        if summary.count() > 0 || summary.has_errors() {
            tracing::info!(
                count = summary.count(),
                errors = summary.errors.len(),
                "Scheduled publish run finished"
            );
        }
        Ok(summary)
    }

    async fn publish_one(
        &self,
        item: &ContentItem,
        now: Timestamp,
    ) -> Result<Option<Timestamp>, DomainError> {
        let newest = self.versions.list_for_item(item.id()).await?;
        let already_archived = newest
            .first()
            .is_some_and(|snapshot| *snapshot.fields() == item.versioned_fields());
        if !already_archived {
            archive_live_fields(self.versions.as_ref(), item, self.actor.clone()).await?;
        }
        self.content.publish_if_due(item.id(), now).await
    }
}
