use crate::api::{ApiError, ApiResult};
use crate::drafts::{DraftEdit, NoteDraft};
use crate::models::{NoteItem, UpdateNotePayload};
use crate::util::timer::{BrowserRuntime, DebounceTimer, LiveFlag, Runtime};
use futures::future::LocalBoxFuture;
use std::sync::{Arc, Mutex, MutexGuard};

/// Quiet period after the last edit before a save goes out.
pub(crate) const AUTOSAVE_DELAY_MS: u32 = 500;
pub(crate) const SAVE_FAILED: &str = "Could not save note.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub(crate) enum SavePhase {
    /// Draft matches what was loaded; nothing pending.
    #[default]
    Idle,
    /// Edited; quiet-period timer pending.
    Dirty,
    Saving,
    Saved,
    Failed,
}

/// What the editor renders from the controller.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct AutosaveSnapshot {
    pub phase: SavePhase,
    /// Empty unless the last save failed.
    pub status: String,
    /// Server-provided timestamp of the last successful write.
    pub edited_at: String,
    pub draft: Option<NoteDraft>,
}

pub(crate) type SaveFuture = LocalBoxFuture<'static, ApiResult<NoteItem>>;
pub(crate) type SaveFn = Arc<dyn Fn(i64, UpdateNotePayload) -> SaveFuture + Send + Sync>;
pub(crate) type Listener = Arc<dyn Fn(&AutosaveSnapshot) + Send + Sync>;

#[derive(Default)]
struct Inner {
    note_id: Option<i64>,
    snapshot: AutosaveSnapshot,
    /// Generation of the most recently dispatched save.
    dispatched: u64,
    /// Generation of the most recently applied save result.
    applied: u64,
}

/// Debounced autosave for one mounted note editor.
///
/// - `hydrate` installs the loaded note without scheduling anything, so
///   loading a note never writes it back.
/// - every `edit` restarts the quiet-period timer; only the draft as it is
///   when the timer fires gets sent.
/// - results are applied only while the editor is alive, and never older
///   than a result already applied.
#[derive(Clone)]
pub(crate) struct AutosaveController<R: Runtime = BrowserRuntime> {
    inner: Arc<Mutex<Inner>>,
    timer: DebounceTimer<R>,
    live: LiveFlag,
    save: SaveFn,
    listener: Listener,
}

impl<R: Runtime> AutosaveController<R> {
    pub fn new(runtime: R, save: SaveFn, listener: Listener) -> Self {
        Self::with_delay(runtime, AUTOSAVE_DELAY_MS, save, listener)
    }

    pub fn with_delay(runtime: R, delay_ms: u32, save: SaveFn, listener: Listener) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            timer: DebounceTimer::new(runtime, delay_ms),
            live: LiveFlag::new(),
            save,
            listener,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn notify(&self, snapshot: AutosaveSnapshot) {
        (self.listener)(&snapshot);
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> AutosaveSnapshot {
        self.lock().snapshot.clone()
    }

    /// Install a freshly loaded note as the draft.
    pub fn hydrate(&self, note: &NoteItem) {
        if !self.live.is_alive() {
            return;
        }
        self.timer.cancel();

        let snapshot = {
            let mut inner = self.lock();
            inner.note_id = Some(note.id);
            inner.snapshot = AutosaveSnapshot {
                phase: SavePhase::Idle,
                status: String::new(),
                edited_at: note.edited_at.clone(),
                draft: Some(NoteDraft::from_note(note)),
            };
            inner.snapshot.clone()
        };
        self.notify(snapshot);
    }

    /// Apply a user edit and (re)start the quiet period.
    pub fn edit(&self, edit: DraftEdit) {
        if !self.live.is_alive() {
            return;
        }

        let snapshot = {
            let mut inner = self.lock();
            let Some(draft) = inner.snapshot.draft.as_mut() else {
                // Nothing loaded yet.
                return;
            };
            let changed = draft.apply(edit);
            tracing::trace!(changed, "draft edited");
            inner.snapshot.phase = SavePhase::Dirty;
            inner.snapshot.clone()
        };
        self.notify(snapshot);

        let this = self.clone();
        self.timer.restart(move || this.flush());
    }

    /// Send the current draft. Called when the quiet period ends.
    fn flush(&self) {
        if !self.live.is_alive() {
            return;
        }

        let (note_id, payload, generation, snapshot) = {
            let mut inner = self.lock();
            let (Some(note_id), Some(draft)) = (inner.note_id, inner.snapshot.draft.as_ref())
            else {
                return;
            };
            let payload = draft.to_update_payload();
            inner.dispatched += 1;
            inner.snapshot.phase = SavePhase::Saving;
            (note_id, payload, inner.dispatched, inner.snapshot.clone())
        };
        self.notify(snapshot);

        tracing::debug!(note_id, generation, "autosave dispatched");
        let fut = (self.save)(note_id, payload);
        let this = self.clone();
        self.timer.runtime().spawn(Box::pin(async move {
            let result = fut.await;
            this.finish(generation, result);
        }));
    }

    fn finish(&self, generation: u64, result: ApiResult<NoteItem>) {
        if !self.live.is_alive() {
            tracing::debug!(generation, "autosave settled after teardown; ignored");
            return;
        }

        let pending_edit = self.timer.is_pending();
        let snapshot = {
            let mut inner = self.lock();
            if generation < inner.applied {
                tracing::debug!(generation, applied = inner.applied, "stale autosave result dropped");
                return;
            }
            inner.applied = generation;
            let newer_in_flight = inner.dispatched > generation;

            match result {
                Ok(note) => {
                    inner.snapshot.edited_at = note.edited_at;
                    inner.snapshot.status.clear();
                    inner.snapshot.phase = if pending_edit {
                        SavePhase::Dirty
                    } else if newer_in_flight {
                        SavePhase::Saving
                    } else {
                        SavePhase::Saved
                    };
                }
                Err(e) => {
                    tracing::warn!(generation, error = %e, "autosave failed");
                    // Draft stays as-is; the next edit burst retries.
                    inner.snapshot.status = failure_status(&e);
                    inner.snapshot.phase = if pending_edit {
                        SavePhase::Dirty
                    } else {
                        SavePhase::Failed
                    };
                }
            }
            inner.snapshot.clone()
        };
        self.notify(snapshot);
    }

    /// Stop everything: pending timer cancelled, in-flight results ignored.
    pub fn teardown(&self) {
        self.timer.cancel();
        self.live.tear_down();
    }
}

fn failure_status(e: &ApiError) -> String {
    e.status_or(SAVE_FAILED)
}
