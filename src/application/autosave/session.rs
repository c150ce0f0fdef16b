//! AutosaveSession - debounced persistence of one editor's buffer.
//!
//! Every session owns a single writer task. Debounced saves, manual saves and
//! rebinds are all requests on the same channel, so writes for one session
//! are strictly ordered. A timer task is spawned per edit and aborted by the
//! next one; each timer carries the edit epoch it was started for and the
//! writer drops it if a newer edit has happened since.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use super::AutosaveError;
use crate::domain::content::ContentFields;
use crate::domain::draft::{DraftTarget, LocalDraftEntry};
use crate::domain::foundation::{ContentItemId, Timestamp};
use crate::ports::{ContentRepository, LocalDraftCache};

/// Default quiescence interval.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_secs(5);

/// Tuning for an autosave session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutosaveOptions {
    /// Inactivity period after the last edit before the buffer is written.
    pub quiescence: Duration,
}

impl Default for AutosaveOptions {
    fn default() -> Self {
        Self {
            quiescence: DEFAULT_QUIESCENCE,
        }
    }
}

impl AutosaveOptions {
    pub fn with_quiescence(mut self, quiescence: Duration) -> Self {
        self.quiescence = quiescence;
        self
    }
}

/// What a save attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The buffer was written.
    Saved,
    /// The buffer matched the last persisted value; nothing was written.
    Unchanged,
    /// The buffer had neither title nor body; nothing was written.
    Empty,
}

/// Point-in-time view of a session, for "unsaved changes" UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutosaveStatus {
    pub target: DraftTarget,
    pub dirty: bool,
    pub last_saved_at: Option<Timestamp>,
    pub last_error: Option<String>,
    pub epoch: u64,
}

enum Request {
    Debounced {
        epoch: u64,
    },
    Immediate {
        reply: oneshot::Sender<Result<SaveOutcome, AutosaveError>>,
    },
    Rebind {
        id: ContentItemId,
        saved: ContentFields,
        reply: oneshot::Sender<Result<(), AutosaveError>>,
    },
}

struct SessionState {
    target: DraftTarget,
    buffer: ContentFields,
    last_persisted: Option<String>,
    dirty: bool,
    last_saved_at: Option<Timestamp>,
    last_error: Option<String>,
}

impl SessionState {
    fn differs_from_persisted(&self) -> bool {
        if self.buffer.is_blank() {
            return false;
        }
        match self.buffer.to_snapshot() {
            Ok(snapshot) => self.last_persisted.as_deref() != Some(snapshot.as_str()),
            Err(_) => true,
        }
    }
}

struct Shared {
    state: Mutex<SessionState>,
    epoch: AtomicU64,
    content_repo: Arc<dyn ContentRepository>,
    draft_cache: Arc<dyn LocalDraftCache>,
}

impl Shared {
    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn persist(&self) -> Result<SaveOutcome, AutosaveError> {
        let (target, fields, snapshot) = {
            let mut state = self.state();
            if state.buffer.is_blank() {
                state.dirty = false;
                return Ok(SaveOutcome::Empty);
            }
            let snapshot = state.buffer.to_snapshot()?;
            if state.last_persisted.as_deref() == Some(snapshot.as_str()) {
                state.dirty = false;
                return Ok(SaveOutcome::Unchanged);
            }
            (state.target.clone(), state.buffer.clone(), snapshot)
        };

        let now = Timestamp::now();
        let result = match &target {
            DraftTarget::Persisted(id) => self
                .content_repo
                .save_draft_snapshot(id, &snapshot)
                .await
                .map_err(AutosaveError::from),
            DraftTarget::Unsaved(key) => self
                .draft_cache
                .store(key, &LocalDraftEntry::new(fields, now))
                .await
                .map_err(AutosaveError::from),
        };

        let mut state = self.state();
        match result {
            Ok(()) => {
                state.last_persisted = Some(snapshot);
                state.last_saved_at = Some(now);
                state.last_error = None;
                state.dirty = state.differs_from_persisted();
                tracing::debug!(draft = %target, "Draft autosaved");
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                tracing::warn!(draft = %target, error = %e, "Autosave failed");
                state.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn rebind(&self, id: ContentItemId, saved: ContentFields) -> Result<(), AutosaveError> {
        let stale_key = {
            let mut state = self.state();
            let stale_key = match &state.target {
                DraftTarget::Persisted(current) if *current == id => return Ok(()),
                DraftTarget::Persisted(current) => {
                    return Err(AutosaveError::AlreadyBound {
                        current: *current,
                        requested: id,
                    })
                }
                DraftTarget::Unsaved(key) => key.clone(),
            };

            state.target = DraftTarget::Persisted(id);
            state.last_persisted = Some(saved.to_snapshot()?);
            state.dirty = state.differs_from_persisted();
            stale_key
        };

        tracing::info!(item_id = %id, "Autosave session bound to saved content item");

        // Later writes go to the item; the old slot must not be recovered.
        self.draft_cache.clear(&stale_key).await.map_err(|e| {
            tracing::warn!(item_id = %id, error = %e, "Failed to clear local draft after first save");
            AutosaveError::from(e)
        })
    }

    async fn run_writer(self: Arc<Self>, mut requests: mpsc::UnboundedReceiver<Request>) {
        while let Some(request) = requests.recv().await {
            match request {
                Request::Debounced { epoch } => {
                    let current = self.epoch.load(Ordering::SeqCst);
                    if epoch != current {
                        tracing::trace!(epoch, current, "Skipping stale autosave timer");
                        continue;
                    }
                    // Failures are recorded in the session status.
                    let _ = self.persist().await;
                }
                Request::Immediate { reply } => {
                    let _ = reply.send(self.persist().await);
                }
                Request::Rebind { id, saved, reply } => {
                    let _ = reply.send(self.rebind(id, saved).await);
                }
            }
        }
    }
}

/// A debounced autosave session for one open editor.
///
/// Must be created and used from within a tokio runtime.
pub struct AutosaveSession {
    shared: Arc<Shared>,
    options: AutosaveOptions,
    requests: Option<mpsc::UnboundedSender<Request>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    writer: Option<JoinHandle<()>>,
}

impl AutosaveSession {
    /// Open a session over `target`.
    ///
    /// `initial` is the buffer the editor starts from (for example a
    /// recovered draft). It is treated as already persisted.
    pub fn open(
        target: DraftTarget,
        initial: ContentFields,
        options: AutosaveOptions,
        content_repo: Arc<dyn ContentRepository>,
        draft_cache: Arc<dyn LocalDraftCache>,
    ) -> Self {
        let last_persisted = if initial.is_blank() {
            None
        } else {
            initial.to_snapshot().ok()
        };

        let shared = Arc::new(Shared {
            state: Mutex::new(SessionState {
                target,
                buffer: initial,
                last_persisted,
                dirty: false,
                last_saved_at: None,
                last_error: None,
            }),
            epoch: AtomicU64::new(0),
            content_repo,
            draft_cache,
        });

        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(Arc::clone(&shared).run_writer(rx));

        Self {
            shared,
            options,
            requests: Some(tx),
            timer: Mutex::new(None),
            writer: Some(writer),
        }
    }

    /// Replace the edit buffer and restart the quiescence timer.
    pub fn edit(&self, fields: ContentFields) {
        let epoch = {
            let mut state = self.shared.state();
            state.buffer = fields;
            state.dirty = state.differs_from_persisted();
            self.shared.epoch.fetch_add(1, Ordering::SeqCst) + 1
        };

        let Some(tx) = self.requests.clone() else {
            return;
        };
        let quiescence = self.options.quiescence;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(quiescence).await;
            let _ = tx.send(Request::Debounced { epoch });
        });

        if let Some(previous) = self.timer_slot().replace(handle) {
            previous.abort();
        }
    }

    /// Cancel the pending timer and save right away.
    pub async fn save_now(&self) -> Result<SaveOutcome, AutosaveError> {
        self.cancel_timer();
        let (reply, response) = oneshot::channel();
        self.send(Request::Immediate { reply })?;
        response.await.map_err(|_| AutosaveError::Stopped)?
    }

    /// Re-home the session after the first explicit save assigned `id`.
    ///
    /// `saved` is what the explicit save wrote; the buffer only counts as
    /// dirty if it has moved on since. The local draft slot is cleared in
    /// the same ordered step, so no later write can bring it back.
    pub async fn bind_remote(
        &self,
        id: ContentItemId,
        saved: ContentFields,
    ) -> Result<(), AutosaveError> {
        let (reply, response) = oneshot::channel();
        self.send(Request::Rebind { id, saved, reply })?;
        response.await.map_err(|_| AutosaveError::Stopped)?
    }

    /// True when the buffer holds changes no save has completed for.
    pub fn has_unsaved_changes(&self) -> bool {
        self.shared.state().dirty
    }

    pub fn status(&self) -> AutosaveStatus {
        let state = self.shared.state();
        AutosaveStatus {
            target: state.target.clone(),
            dirty: state.dirty,
            last_saved_at: state.last_saved_at,
            last_error: state.last_error.clone(),
            epoch: self.shared.epoch.load(Ordering::SeqCst),
        }
    }

    /// Close the editor: cancel the pending timer and let already queued
    /// writes finish.
    ///
    /// Returns `true` when unsaved changes remain, which callers surface as
    /// an unload warning.
    pub async fn close(mut self) -> bool {
        self.cancel_timer();
        self.requests.take();
        if let Some(writer) = self.writer.take() {
            if let Err(e) = writer.await {
                tracing::error!(error = %e, "Autosave writer task failed");
            }
        }
        self.has_unsaved_changes()
    }

    /// Load the draft an editor should resume from.
    ///
    /// For a saved item this is its autosaved draft, falling back to the live
    /// fields; for a new item it is the local slot.
    pub async fn recover_draft(
        target: &DraftTarget,
        content_repo: &dyn ContentRepository,
        draft_cache: &dyn LocalDraftCache,
    ) -> Result<Option<ContentFields>, AutosaveError> {
        match target {
            DraftTarget::Persisted(id) => {
                let Some(item) = content_repo.find_by_id(id).await? else {
                    return Ok(None);
                };
                match item.draft_snapshot() {
                    Some(snapshot) => Ok(Some(ContentFields::from_snapshot(snapshot)?)),
                    None => Ok(Some(item.fields().clone())),
                }
            }
            DraftTarget::Unsaved(key) => Ok(draft_cache.load(key).await?.map(|entry| entry.fields)),
        }
    }

    fn send(&self, request: Request) -> Result<(), AutosaveError> {
        self.requests
            .as_ref()
            .ok_or(AutosaveError::Stopped)?
            .send(request)
            .map_err(|_| AutosaveError::Stopped)
    }

    fn timer_slot(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.timer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn cancel_timer(&self) {
        if let Some(handle) = self.timer_slot().take() {
            handle.abort();
        }
    }
}

impl Drop for AutosaveSession {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
