//! State transitions for session actions, backend events, and autosave flow.

use super::{EditorSession, StatusMessage, ToastMessage, STATUS_TTL, TOAST_LIMIT, TOAST_TTL};
use crate::autosave::{ManualSave, SavePlan};
use crate::backend::{StoreCmd, StoreErrorSource, StoreEvent};
use crate::clipboard::{export_artifact, ClipboardSink};
use markpress_core::models::{DocumentDraft, DocumentSummary};
use markpress_core::render::{CodeTheme, Template};
use markpress_core::{RenderedArtifact, DEFAULT_TITLE};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

impl EditorSession {
    /// Apply a new source text from the editor view.
    ///
    /// Edits are applied strictly in call order; each one (re)arms the
    /// autosave debounce window.
    pub fn edit(&mut self, text: String, now: Instant) {
        if self.source.as_str() == text {
            return;
        }
        self.source.set(text);
        debug!(revision = self.source.revision(), "source edited");
        self.scheduler.note_edit(now);
    }

    /// Advance timers: expire notifications and fire the debounce deadline.
    pub fn tick(&mut self, now: Instant) {
        self.expire_notifications(now);
        if let Some(plan) = self.scheduler.poll(now) {
            self.dispatch_save(plan, "Autosave");
        }
    }

    /// Drain every queued backend event into the session.
    ///
    /// # Returns
    /// The number of events applied.
    pub fn pump_events(&mut self, now: Instant) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.store.evt_rx.try_recv() {
            self.apply_event(event, now);
            applied += 1;
        }
        applied
    }

    /// Save immediately, bypassing the debounce window.
    ///
    /// Refused with a sign-in prompt while unauthenticated. While a save is
    /// already in flight the request is queued and dispatched on resolution,
    /// never in parallel.
    pub fn manual_save(&mut self) {
        if !self.auth.is_authenticated() {
            self.set_status("Save failed: sign in to save your work.");
            return;
        }
        match self.scheduler.manual_save() {
            ManualSave::Dispatch(plan) => self.dispatch_save(plan, "Save"),
            ManualSave::Queued => self.set_status("Saving; your change will follow."),
        }
    }

    /// Throw away local edits and return to the last persisted text.
    pub fn discard_draft(&mut self) {
        match self.selected_id {
            Some(id) => {
                let doc_key = self.allocate_doc_key();
                self.scheduler.reset(doc_key, Some(id));
                if self.store.cmd_tx.send(StoreCmd::FetchDocument { id }).is_err() {
                    self.set_status("Discard failed: backend unavailable.");
                    return;
                }
                self.set_status("Restoring the last saved version...");
            }
            None => {
                let doc_key = self.allocate_doc_key();
                self.source.reset(String::new());
                self.persisted_text.clear();
                self.scheduler.reset(doc_key, None);
                self.set_status("Draft discarded.");
            }
        }
    }

    /// Start a fresh unsaved document, replacing the current one.
    pub fn new_document(&mut self) {
        let doc_key = self.allocate_doc_key();
        self.selected_id = None;
        self.title = DEFAULT_TITLE.to_string();
        self.source.reset(String::new());
        self.persisted_text.clear();
        self.scheduler.reset(doc_key, None);
        self.scroll.reset();
        self.set_status("Started a new document.");
    }

    /// Open a persisted document by identity.
    ///
    /// The switch is immediate: the scheduler is re-keyed so a previous
    /// document's in-flight save resolves into the void, and the content
    /// arrives through [`StoreEvent::DocumentLoaded`].
    pub fn select_document(&mut self, id: i64) {
        if self.selected_id == Some(id) {
            return;
        }
        let doc_key = self.allocate_doc_key();
        self.selected_id = Some(id);
        self.title.clear();
        self.source.reset(String::new());
        self.persisted_text.clear();
        self.scheduler.reset(doc_key, Some(id));
        self.scroll.reset();
        if self.store.cmd_tx.send(StoreCmd::FetchDocument { id }).is_err() {
            self.selected_id = None;
            self.set_status("Open failed: backend unavailable.");
        }
    }

    /// Switch the preview template; template changes reset style overrides.
    pub fn change_template(&mut self, id: &str) {
        let template = Template::by_id(id);
        if self.template_id == template.id {
            return;
        }
        self.template_id = template.id.to_string();
        self.style_options.clear();
        self.set_status(format!("Template changed to {}.", template.name));
    }

    /// Replace the per-document style overrides.
    pub fn change_style_options(&mut self, options: markpress_core::StyleOptions) {
        self.style_options = options;
    }

    /// Switch the code highlighting theme.
    pub fn change_code_theme(&mut self, id: &str) {
        let theme = CodeTheme::by_id(id);
        if self.code_theme_id == theme.id {
            return;
        }
        self.code_theme_id = theme.id.to_string();
        self.set_status(format!("Code theme changed to {}.", theme.name));
    }

    /// Request the current document list from the store.
    pub fn refresh_documents(&mut self) {
        if !self.auth.is_authenticated() {
            self.set_status("Sign in to load your documents.");
            return;
        }
        if self.store.cmd_tx.send(StoreCmd::ListDocuments).is_err() {
            self.set_status("List failed: backend unavailable.");
        }
    }

    /// Render (or reuse) the preview artifact for the current inputs.
    pub fn render_preview(&mut self) -> Arc<RenderedArtifact> {
        let input = markpress_core::RenderInput {
            source: self.source.as_str(),
            template_id: &self.template_id,
            style_options: &self.style_options,
            code_theme_id: &self.code_theme_id,
        };
        let artifact = self.pipeline.render(&input);
        self.artifact = Some(Arc::clone(&artifact));
        artifact
    }

    /// Copy the rendered preview to the clipboard as rich content.
    ///
    /// # Returns
    /// `true` when the single atomic clipboard write landed; `false` (with a
    /// notification) when nothing is rendered or the clipboard refuses.
    pub fn copy_rendered_output(&mut self, sink: &mut dyn ClipboardSink) -> bool {
        let artifact = self.render_preview();
        if export_artifact(&artifact, sink) {
            self.set_status("Copied styled content to the clipboard.");
            true
        } else {
            self.set_status("Copy failed: nothing rendered or clipboard unavailable.");
            false
        }
    }

    /// Monotonic revision of the source buffer.
    pub fn source_revision(&self) -> u64 {
        self.source.revision()
    }

    fn dispatch_save(&mut self, plan: SavePlan, mode: &str) {
        if !self.auth.is_authenticated() {
            self.scheduler.abort_dispatch(&plan);
            self.set_status(format!("{} skipped: sign in to save your work.", mode));
            return;
        }
        let draft = DocumentDraft {
            title: self.title.clone(),
            content: self.source.as_str().to_string(),
        };
        let command = match plan.target {
            Some(id) => StoreCmd::UpdateDocument {
                plan: plan.clone(),
                id,
                draft,
            },
            None => StoreCmd::CreateDocument {
                plan: plan.clone(),
                draft,
            },
        };
        if self.store.cmd_tx.send(command).is_err() {
            self.scheduler.abort_dispatch(&plan);
            self.set_status(format!("{} failed: backend unavailable.", mode));
        }
    }

    /// Apply one backend event to the session state.
    pub fn apply_event(&mut self, event: StoreEvent, now: Instant) {
        match event {
            StoreEvent::DocumentList { items } => {
                self.documents = items;
            }
            StoreEvent::DocumentLoaded { document } => {
                if self.selected_id == Some(document.id) {
                    self.title = document.title.clone();
                    self.source.reset(document.content.clone());
                    self.persisted_text = document.content;
                    self.scroll.reset();
                    self.set_status(format!("Loaded \"{}\".", document.title));
                }
            }
            StoreEvent::DocumentCreated { plan, document } => {
                if plan.doc_key == self.scheduler.doc_key() {
                    self.selected_id = Some(document.id);
                    self.persisted_text = document.content.clone();
                    self.documents
                        .insert(0, DocumentSummary::from_document(&document));
                    if plan.generation == self.scheduler.generation() {
                        self.set_status("Article created and saved.");
                    }
                }
                if let Some(followup) = self.scheduler.on_save_success(&plan, document.id, now) {
                    self.dispatch_save(followup, "Save");
                }
            }
            StoreEvent::DocumentSaved { plan, document } => {
                if let Some(item) = self
                    .documents
                    .iter_mut()
                    .find(|item| item.id == document.id)
                {
                    *item = DocumentSummary::from_document(&document);
                }
                if plan.doc_key == self.scheduler.doc_key() {
                    self.persisted_text = document.content.clone();
                    if plan.generation == self.scheduler.generation() {
                        self.set_status("Saved.");
                    }
                }
                if let Some(followup) = self.scheduler.on_save_success(&plan, document.id, now) {
                    self.dispatch_save(followup, "Save");
                }
            }
            StoreEvent::LoadFailed { id, message } => {
                warn!("load failed for document {}: {}", id, message);
                self.set_status(message);
            }
            StoreEvent::Error { source, message } => {
                warn!("store error ({:?}): {}", source, message);
                match source {
                    StoreErrorSource::Save { plan } => {
                        let relevant = plan.doc_key == self.scheduler.doc_key();
                        let followup = self.scheduler.on_save_failure(&plan, now);
                        if relevant {
                            self.set_status(format!("{} Save again to retry.", message));
                        }
                        if let Some(followup) = followup {
                            self.dispatch_save(followup, "Save");
                        }
                    }
                    StoreErrorSource::List => self.set_status(message),
                }
            }
        }
    }

    pub(super) fn set_status(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.status = Some(StatusMessage {
            text: text.clone(),
            expires_at: Instant::now() + STATUS_TTL,
        });
        self.push_toast(text);
    }

    fn push_toast(&mut self, text: String) {
        let now = Instant::now();
        if let Some(last) = self.toasts.back_mut() {
            if last.text == text {
                last.expires_at = now + TOAST_TTL;
                return;
            }
        }
        self.toasts.push_back(ToastMessage {
            text,
            expires_at: now + TOAST_TTL,
        });
        while self.toasts.len() > TOAST_LIMIT {
            self.toasts.pop_front();
        }
    }

    fn expire_notifications(&mut self, now: Instant) {
        if let Some(status) = &self.status {
            if now >= status.expires_at {
                self.status = None;
            }
        }
        while self
            .toasts
            .front()
            .map(|toast| now >= toast.expires_at)
            .unwrap_or(false)
        {
            self.toasts.pop_front();
        }
    }
}
