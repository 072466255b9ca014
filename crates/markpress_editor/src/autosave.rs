//! Debounced auto-save state machine.
//!
//! One scheduler instance tracks the active document. Edits arm a deadline;
//! the session polls the scheduler from its tick loop and dispatches the
//! returned [`SavePlan`] to the backend worker. Staleness of completions is
//! decided by a monotonically increasing generation counter together with the
//! local `doc_key`, so a save that resolves after the user switched documents
//! (or kept typing) can never clear the wrong draft.

use std::time::{Duration, Instant};

/// Save lifecycle of the active document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    /// Source text equals the last known persisted text.
    Clean,
    /// Edited, with no save scheduled or in flight.
    Dirty,
    /// Debounce deadline armed.
    Pending,
    /// A create or update call is in flight.
    Saving,
    /// The last attempt errored; logically dirty, retryable.
    Failed,
}

/// One scheduled write: which document instance, which edit generation, and
/// whether it creates (`target: None`) or updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub doc_key: u64,
    pub generation: u64,
    pub target: Option<i64>,
}

/// Outcome of a manual save request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManualSave {
    /// Dispatch this plan now.
    Dispatch(SavePlan),
    /// A call is already in flight; the follow-up fires on its resolution.
    Queued,
}

/// Debounce scheduler for one editor session.
#[derive(Debug)]
pub struct AutoSaveScheduler {
    doc_key: u64,
    identity: Option<i64>,
    state: SaveState,
    generation: u64,
    deadline: Option<Instant>,
    in_flight: Option<SavePlan>,
    queued_manual: bool,
    delay: Duration,
}

impl AutoSaveScheduler {
    /// Create a scheduler with the given debounce window.
    pub fn new(delay: Duration) -> Self {
        Self {
            doc_key: 0,
            identity: None,
            state: SaveState::Clean,
            generation: 0,
            deadline: None,
            in_flight: None,
            queued_manual: false,
            delay,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    /// Server identity of the tracked document, once known.
    pub fn identity(&self) -> Option<i64> {
        self.identity
    }

    pub fn doc_key(&self) -> u64 {
        self.doc_key
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the draft indicator should be shown.
    pub fn is_dirty(&self) -> bool {
        self.state != SaveState::Clean
    }

    /// Point the scheduler at a different document instance.
    ///
    /// Any armed deadline and in-flight bookkeeping is discarded; a previous
    /// document's save may still resolve, but its `doc_key` no longer matches
    /// and the completion is ignored.
    pub fn reset(&mut self, doc_key: u64, identity: Option<i64>) {
        self.doc_key = doc_key;
        self.identity = identity;
        self.state = SaveState::Clean;
        self.generation = 0;
        self.deadline = None;
        self.in_flight = None;
        self.queued_manual = false;
    }

    /// Record an edit and (re)arm the debounce deadline.
    pub fn note_edit(&mut self, now: Instant) {
        self.generation = self.generation.wrapping_add(1);
        if self.state == SaveState::Saving {
            // The in-flight result is now stale; its resolution re-arms the
            // deadline instead of clearing the draft.
            return;
        }
        self.state = SaveState::Pending;
        self.deadline = Some(now + self.delay);
    }

    /// Fire the debounce deadline when it has expired.
    ///
    /// # Returns
    /// The plan to dispatch, with the generation captured at fire time, or
    /// `None` while the deadline has not passed or a call is in flight.
    pub fn poll(&mut self, now: Instant) -> Option<SavePlan> {
        if self.state != SaveState::Pending || self.in_flight.is_some() {
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        Some(self.begin_save())
    }

    /// Request an immediate save, bypassing the debounce window.
    ///
    /// While a call is in flight the request is queued and dispatched when
    /// that call resolves, so a never-persisted document cannot race itself
    /// into duplicate creates.
    pub fn manual_save(&mut self) -> ManualSave {
        if self.in_flight.is_some() {
            self.queued_manual = true;
            return ManualSave::Queued;
        }
        self.deadline = None;
        ManualSave::Dispatch(self.begin_save())
    }

    /// Roll back a plan whose dispatch could not be issued.
    pub fn abort_dispatch(&mut self, plan: &SavePlan) {
        if plan.doc_key != self.doc_key {
            return;
        }
        self.in_flight = None;
        self.queued_manual = false;
        self.state = SaveState::Failed;
    }

    /// Apply a successful save completion.
    ///
    /// A first create's identity is adopted even when the completion is
    /// stale, so subsequent saves update instead of re-creating. The state
    /// only becomes [`SaveState::Clean`] when the plan's generation is still
    /// current.
    ///
    /// # Returns
    /// A queued manual save to dispatch immediately, if one was requested
    /// while this call was in flight.
    pub fn on_save_success(
        &mut self,
        plan: &SavePlan,
        saved_id: i64,
        now: Instant,
    ) -> Option<SavePlan> {
        if plan.doc_key != self.doc_key {
            return None;
        }
        self.in_flight = None;
        if plan.target.is_none() && self.identity.is_none() {
            self.identity = Some(saved_id);
        }

        if self.queued_manual {
            self.queued_manual = false;
            return Some(self.begin_save());
        }

        if plan.generation == self.generation {
            self.state = SaveState::Clean;
        } else {
            self.state = SaveState::Pending;
            self.deadline = Some(now + self.delay);
        }
        None
    }

    /// Apply a failed save completion.
    ///
    /// # Returns
    /// A queued manual save to dispatch immediately, if any.
    pub fn on_save_failure(&mut self, plan: &SavePlan, now: Instant) -> Option<SavePlan> {
        if plan.doc_key != self.doc_key {
            return None;
        }
        self.in_flight = None;

        if self.queued_manual {
            self.queued_manual = false;
            return Some(self.begin_save());
        }

        if plan.generation == self.generation {
            self.state = SaveState::Failed;
        } else {
            // Newer edits are waiting; keep the autosave armed.
            self.state = SaveState::Pending;
            self.deadline = Some(now + self.delay);
        }
        None
    }

    fn begin_save(&mut self) -> SavePlan {
        self.state = SaveState::Saving;
        let plan = SavePlan {
            doc_key: self.doc_key,
            generation: self.generation,
            target: self.identity,
        };
        self.in_flight = Some(plan.clone());
        plan
    }
}
