//! Content item aggregate.
//!
//! # Invariants
//!
//! - `scheduled_at` set ⇒ not published and no `published_at`
//! - published ⇒ no `scheduled_at` and `published_at` set
//! - `revision` grows by one on every authoritative write (the repository
//!   owns the increment)

use serde::{Deserialize, Serialize};

use super::{ContentFields, Publication, PublicationStatus};
use crate::domain::foundation::{
    AuthorId, ContentItemId, DomainError, ErrorCode, StateMachine, Timestamp,
};
use crate::domain::version::VersionedFields;

/// A single authored post and its lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    id: ContentItemId,
    author_id: AuthorId,
    fields: ContentFields,
    publication: Publication,
    /// Serialized [`ContentFields`] written by autosave; opaque to the store.
    draft_snapshot: Option<String>,
    /// Set when a command superseded the draft since the item was loaded.
    /// Repositories only touch the stored draft when this is set, so
    /// autosaves that land in between are not overwritten.
    #[serde(skip)]
    draft_discarded: bool,
    revision: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl ContentItem {
    /// Create a new draft item.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the fields are not valid for an explicit save
    pub fn new(
        id: ContentItemId,
        author_id: AuthorId,
        fields: ContentFields,
    ) -> Result<Self, DomainError> {
        let fields = fields.with_default_slug();
        fields.validate()?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            author_id,
            fields,
            publication: Publication::Draft,
            draft_snapshot: None,
            draft_discarded: false,
            revision: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute an item from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: ContentItemId,
        author_id: AuthorId,
        fields: ContentFields,
        publication: Publication,
        draft_snapshot: Option<String>,
        revision: u64,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            author_id,
            fields,
            publication,
            draft_snapshot,
            draft_discarded: false,
            revision,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &ContentItemId {
        &self.id
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn fields(&self) -> &ContentFields {
        &self.fields
    }

    pub fn publication(&self) -> Publication {
        self.publication
    }

    pub fn status(&self) -> PublicationStatus {
        self.publication.status()
    }

    pub fn is_published(&self) -> bool {
        self.publication.is_published()
    }

    pub fn published_at(&self) -> Option<Timestamp> {
        self.publication.published_at()
    }

    pub fn scheduled_at(&self) -> Option<Timestamp> {
        self.publication.scheduled_at()
    }

    pub fn draft_snapshot(&self) -> Option<&str> {
        self.draft_snapshot.as_deref()
    }

    /// True when the next authoritative write must clear the stored draft.
    pub fn discards_draft(&self) -> bool {
        self.draft_discarded
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Fields a version snapshot would capture right now.
    pub fn versioned_fields(&self) -> VersionedFields {
        VersionedFields::from(&self.fields)
    }

    /// Checks a client-supplied revision token.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the item changed since the client loaded it
    pub fn ensure_revision(&self, expected: Option<u64>) -> Result<(), DomainError> {
        match expected {
            Some(expected) if expected != self.revision => Err(DomainError::new(
                ErrorCode::Conflict,
                format!(
                    "Content item {} is at revision {}, expected {}",
                    self.id, self.revision, expected
                ),
            )
            .with_detail("current_revision", self.revision.to_string())),
            _ => Ok(()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replace the live fields. Publication state is left untouched, so
    /// editing a published item keeps it published.
    ///
    /// An explicit save supersedes any autosaved draft.
    pub fn update_fields(&mut self, fields: ContentFields) -> Result<(), DomainError> {
        let fields = fields.with_default_slug();
        fields.validate()?;

        self.fields = fields;
        self.discard_draft();
        self.touch();
        Ok(())
    }

    /// Publish immediately, optionally replacing the fields in the same step.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if already published
    /// - `ValidationFailed` if the new fields are invalid
    pub fn publish_now(
        &mut self,
        fields: Option<ContentFields>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        self.ensure_transition(PublicationStatus::Published)?;
        if let Some(fields) = fields {
            let fields = fields.with_default_slug();
            fields.validate()?;
            self.fields = fields;
        } else {
            self.fields.validate()?;
        }

        self.publication = Publication::Published { at: now };
        self.discard_draft();
        self.touch();
        Ok(())
    }

    /// Defer publication to `at`.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the item is published
    /// - `ValidationFailed` if `at` is not in the future
    pub fn schedule(&mut self, at: Timestamp, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_transition(PublicationStatus::Scheduled)?;
        if !at.is_after(&now) {
            return Err(DomainError::validation(
                "scheduled_at",
                "Scheduled time must be in the future",
            ));
        }
        self.fields.validate()?;

        self.publication = Publication::Scheduled { at };
        self.touch();
        Ok(())
    }

    /// Return a scheduled item to draft.
    pub fn cancel_schedule(&mut self) -> Result<(), DomainError> {
        if self.status() != PublicationStatus::Scheduled {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Content item is not scheduled",
            ));
        }
        self.publication = Publication::Draft;
        self.touch();
        Ok(())
    }

    /// Return a published item to draft.
    pub fn unpublish(&mut self) -> Result<(), DomainError> {
        if self.status() != PublicationStatus::Published {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Content item is not published",
            ));
        }
        self.publication = Publication::Draft;
        self.touch();
        Ok(())
    }

    /// Flip a due scheduled item to published, keeping the author-chosen
    /// time as `published_at`.
    ///
    /// Returns `false` (and changes nothing) when the item is not due.
    pub fn publish_if_due(&mut self, now: Timestamp) -> bool {
        match self.publication {
            Publication::Scheduled { at } if at <= now => {
                self.publication = Publication::Published { at };
                self.touch();
                true
            }
            _ => false,
        }
    }

    /// Copy an archived snapshot over the live fields. Any autosaved draft
    /// predates the restore and is dropped.
    pub fn restore(&mut self, fields: &VersionedFields) {
        self.fields = fields.apply_to(&self.fields);
        self.discard_draft();
        self.touch();
    }

    /// Record an autosaved draft.
    pub fn set_draft_snapshot(&mut self, snapshot: String) {
        self.draft_snapshot = Some(snapshot);
        self.draft_discarded = false;
    }

    /// Called by repositories after a successful authoritative write.
    pub fn mark_persisted(&mut self, revision: u64) {
        self.revision = revision;
        self.draft_discarded = false;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_transition(&self, target: PublicationStatus) -> Result<(), DomainError> {
        self.status().transition_to(target).map(|_| ()).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
        })
    }

    fn discard_draft(&mut self) {
        self.draft_snapshot = None;
        self.draft_discarded = true;
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
