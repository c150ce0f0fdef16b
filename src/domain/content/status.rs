//! Publication state of a content item.
//!
//! The store keeps three loose columns (`published`, `published_at`,
//! `scheduled_at`). In the domain they collapse into one [`Publication`]
//! value so a scheduled-and-published item cannot be represented at all.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StateMachine, Timestamp};

/// Coarse lifecycle status, used for transition rules and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicationStatus {
    Draft,
    Scheduled,
    Published,
}

impl StateMachine for PublicationStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use PublicationStatus::*;
        matches!(
            (self, target),
            (Draft, Scheduled)
                | (Draft, Published)
                | (Scheduled, Scheduled)
                | (Scheduled, Published)
                | (Scheduled, Draft)
                | (Published, Draft)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use PublicationStatus::*;
        match self {
            Draft => vec![Scheduled, Published],
            Scheduled => vec![Scheduled, Published, Draft],
            Published => vec![Draft],
        }
    }
}

/// Full publication state, carrying the timestamp that belongs to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Publication {
    #[default]
    Draft,
    Scheduled { at: Timestamp },
    Published { at: Timestamp },
}

impl Publication {
    /// Rebuilds the state from stored columns, rejecting rows that break
    /// the schedule/publish invariants.
    ///
    /// A draft may still carry a stale `published_at` from before it was
    /// unpublished; that value is dropped.
    pub fn from_columns(
        published: bool,
        published_at: Option<Timestamp>,
        scheduled_at: Option<Timestamp>,
    ) -> Result<Self, DomainError> {
        match (published, published_at, scheduled_at) {
            (true, Some(at), None) => Ok(Publication::Published { at }),
            (false, None, Some(at)) => Ok(Publication::Scheduled { at }),
            (false, _, None) => Ok(Publication::Draft),
            _ => Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!(
                    "Inconsistent publication columns: published={}, published_at={:?}, scheduled_at={:?}",
                    published, published_at, scheduled_at
                ),
            )),
        }
    }

    /// Coarse status.
    pub fn status(&self) -> PublicationStatus {
        match self {
            Publication::Draft => PublicationStatus::Draft,
            Publication::Scheduled { .. } => PublicationStatus::Scheduled,
            Publication::Published { .. } => PublicationStatus::Published,
        }
    }

    /// The `published` column.
    pub fn is_published(&self) -> bool {
        matches!(self, Publication::Published { .. })
    }

    /// The `published_at` column.
    pub fn published_at(&self) -> Option<Timestamp> {
        match self {
            Publication::Published { at } => Some(*at),
            _ => None,
        }
    }

    /// The `scheduled_at` column.
    pub fn scheduled_at(&self) -> Option<Timestamp> {
        match self {
            Publication::Scheduled { at } => Some(*at),
            _ => None,
        }
    }

    /// True when a scheduled time has arrived.
    pub fn is_due(&self, now: Timestamp) -> bool {
        matches!(self, Publication::Scheduled { at } if *at <= now)
    }
}
