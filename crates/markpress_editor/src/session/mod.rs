//! The editor session: live document state and user-facing actions.

mod buffer;
mod state_ops;

#[cfg(test)]
mod tests;

use crate::autosave::{AutoSaveScheduler, SaveState};
use crate::backend::StoreHandle;
use buffer::SourceBuffer;
use markpress_client::AuthSession;
use markpress_core::models::DocumentSummary;
use markpress_core::{
    Config, Pane, RenderInput, RenderPipeline, RenderedArtifact, ScrollMapping,
    ScrollSynchronizer, StyleOptions, DEFAULT_TITLE,
};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

const STATUS_TTL: Duration = Duration::from_secs(5);
const TOAST_TTL: Duration = Duration::from_secs(4);
const TOAST_LIMIT: usize = 4;

pub(crate) struct StatusMessage {
    pub(crate) text: String,
    pub(crate) expires_at: Instant,
}

pub(crate) struct ToastMessage {
    pub(crate) text: String,
    pub(crate) expires_at: Instant,
}

/// Owns one document's editing lifecycle.
///
/// The session runs on a single logical thread: actions mutate state
/// synchronously, blocking I/O lives on the backend worker, and completions
/// come back as events pumped between actions. The render pipeline cache and
/// the auto-save scheduler are both keyed on structural identity, so a stale
/// render or a stale save completion can never clobber newer state.
pub struct EditorSession {
    store: StoreHandle,
    auth: AuthSession,
    pipeline: RenderPipeline,
    scroll: ScrollSynchronizer,
    scheduler: AutoSaveScheduler,
    documents: Vec<DocumentSummary>,
    selected_id: Option<i64>,
    next_doc_key: u64,
    title: String,
    source: SourceBuffer,
    persisted_text: String,
    template_id: String,
    style_options: StyleOptions,
    code_theme_id: String,
    artifact: Option<Arc<RenderedArtifact>>,
    status: Option<StatusMessage>,
    toasts: VecDeque<ToastMessage>,
}

impl EditorSession {
    /// Construct a session starting on a fresh unsaved document.
    ///
    /// The auth session and store handle are injected; nothing is read from
    /// ambient globals. No requests are issued until an action asks for one.
    pub fn new(config: &Config, auth: AuthSession, store: StoreHandle) -> Self {
        let mut scheduler =
            AutoSaveScheduler::new(Duration::from_millis(config.auto_save_interval));
        scheduler.reset(1, None);
        Self {
            store,
            auth,
            pipeline: RenderPipeline::new(),
            scroll: ScrollSynchronizer::new(),
            scheduler,
            documents: Vec::new(),
            selected_id: None,
            next_doc_key: 2,
            title: DEFAULT_TITLE.to_string(),
            source: SourceBuffer::default(),
            persisted_text: String::new(),
            template_id: config.template_id.clone(),
            style_options: StyleOptions::new(),
            code_theme_id: config.code_theme_id.clone(),
            artifact: None,
            status: None,
            toasts: VecDeque::with_capacity(TOAST_LIMIT),
        }
    }

    /// Current save lifecycle state.
    pub fn save_state(&self) -> SaveState {
        self.scheduler.state()
    }

    /// Whether the in-memory source differs from the last persisted text.
    pub fn is_draft(&self) -> bool {
        self.source.as_str() != self.persisted_text || self.scheduler.is_dirty()
    }

    /// Identity of the open document, once persisted.
    pub fn selected_id(&self) -> Option<i64> {
        self.selected_id
    }

    /// Most recently loaded document list.
    pub fn documents(&self) -> &[DocumentSummary] {
        &self.documents
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source_text(&self) -> &str {
        self.source.as_str()
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    pub fn code_theme_id(&self) -> &str {
        &self.code_theme_id
    }

    /// Current status line, if one is active.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Texts of the queued toasts, oldest first.
    pub fn toast_texts(&self) -> Vec<&str> {
        self.toasts.iter().map(|toast| toast.text.as_str()).collect()
    }

    fn render_input(&self) -> RenderInput<'_> {
        RenderInput {
            source: self.source.as_str(),
            template_id: &self.template_id,
            style_options: &self.style_options,
            code_theme_id: &self.code_theme_id,
        }
    }

    /// Whether `artifact` was rendered from the current inputs.
    ///
    /// The view must check this before committing an artifact; a render that
    /// raced a newer edit is discarded here instead of being displayed.
    pub fn preview_is_current(&self, artifact: &RenderedArtifact) -> bool {
        artifact.is_current_for(&self.render_input())
    }

    /// Scroll mapping for the current preview artifact.
    fn scroll_mapping(&self) -> ScrollMapping {
        match &self.artifact {
            Some(artifact) => ScrollMapping::new(&artifact.anchors),
            None => ScrollMapping::default(),
        }
    }

    /// Map a scroll event from one pane onto the other.
    ///
    /// # Returns
    /// The pane to move and its target fraction, or `None` when the event is
    /// the echo of a previous synchronization.
    pub fn note_scroll(&mut self, pane: Pane, fraction: f32) -> Option<(Pane, f32)> {
        let mapping = self.scroll_mapping();
        self.scroll.note_scroll(pane, fraction, &mapping)
    }

    fn allocate_doc_key(&mut self) -> u64 {
        let key = self.next_doc_key;
        self.next_doc_key += 1;
        key
    }
}
