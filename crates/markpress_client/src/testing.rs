//! Recording fake store shared by tests in this and dependent crates.

use crate::api::DocumentStore;
use crate::error::ClientError;
use chrono::Utc;
use markpress_core::models::{Document, DocumentDraft, DocumentSummary};
use std::sync::{Arc, Mutex};

/// One observed store invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List,
    Fetch { id: i64 },
    Create { title: String, content: String },
    Update { id: i64, title: String, content: String },
}

#[derive(Debug, Default)]
struct RecordingState {
    calls: Vec<StoreCall>,
    documents: Vec<Document>,
    next_id: i64,
    fail_next: Option<String>,
}

/// In-memory [`DocumentStore`] that records every call.
///
/// Behaves like the remote API: create assigns the next identity, update
/// touches `updated_at`, fetch of a missing id fails. `fail_next` makes the
/// next operation return an API error, for failure-path tests.
#[derive(Debug, Clone)]
pub struct RecordingStore {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(RecordingState {
                next_id: 1,
                ..RecordingState::default()
            })),
        }
    }

    /// Seed an existing document (advances the id counter past it).
    pub fn seed_document(&self, document: Document) {
        let mut state = self.state.lock().expect("store state");
        state.next_id = state.next_id.max(document.id + 1);
        state.documents.push(document);
    }

    /// Snapshot of every call made so far.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().expect("store state").calls.clone()
    }

    /// Make the next operation fail with an API error carrying `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().expect("store state").fail_next = Some(message.into());
    }

    fn begin(&self, call: StoreCall) -> Result<(), ClientError> {
        let mut state = self.state.lock().expect("store state");
        state.calls.push(call);
        match state.fail_next.take() {
            Some(message) => Err(ClientError::Api {
                code: 5000,
                message,
            }),
            None => Ok(()),
        }
    }
}

impl Default for RecordingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore for RecordingStore {
    fn list(&self) -> Result<Vec<DocumentSummary>, ClientError> {
        self.begin(StoreCall::List)?;
        let state = self.state.lock().expect("store state");
        let mut summaries: Vec<DocumentSummary> = state
            .documents
            .iter()
            .map(DocumentSummary::from_document)
            .collect();
        summaries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(summaries)
    }

    fn fetch(&self, id: i64) -> Result<Document, ClientError> {
        self.begin(StoreCall::Fetch { id })?;
        let state = self.state.lock().expect("store state");
        state
            .documents
            .iter()
            .find(|document| document.id == id)
            .cloned()
            .ok_or(ClientError::Api {
                code: 4004,
                message: format!("article {} not found", id),
            })
    }

    fn create(&self, draft: &DocumentDraft) -> Result<Document, ClientError> {
        self.begin(StoreCall::Create {
            title: draft.title.clone(),
            content: draft.content.clone(),
        })?;
        let mut state = self.state.lock().expect("store state");
        let now = Utc::now();
        let document = Document {
            id: state.next_id,
            user_id: Some(1),
            title: draft.title.clone(),
            content: draft.content.clone(),
            created_at: now,
            updated_at: now,
        };
        state.next_id += 1;
        state.documents.push(document.clone());
        Ok(document)
    }

    fn update(&self, id: i64, draft: &DocumentDraft) -> Result<Document, ClientError> {
        self.begin(StoreCall::Update {
            id,
            title: draft.title.clone(),
            content: draft.content.clone(),
        })?;
        let mut state = self.state.lock().expect("store state");
        let document = state
            .documents
            .iter_mut()
            .find(|document| document.id == id)
            .ok_or(ClientError::Api {
                code: 4004,
                message: format!("article {} not found", id),
            })?;
        document.title = draft.title.clone();
        document.content = draft.content.clone();
        document.updated_at = Utc::now();
        Ok(document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordingStore, StoreCall};
    use crate::api::DocumentStore;
    use markpress_core::models::DocumentDraft;

    fn draft(title: &str, content: &str) -> DocumentDraft {
        DocumentDraft {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn create_assigns_sequential_identities() {
        let store = RecordingStore::new();
        let first = store.create(&draft("a", "1")).expect("create");
        let second = store.create(&draft("b", "2")).expect("create");
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(
            store.calls(),
            vec![
                StoreCall::Create {
                    title: "a".to_string(),
                    content: "1".to_string()
                },
                StoreCall::Create {
                    title: "b".to_string(),
                    content: "2".to_string()
                },
            ]
        );
    }

    #[test]
    fn fail_next_affects_exactly_one_call() {
        let store = RecordingStore::new();
        store.fail_next("boom");
        assert!(store.create(&draft("a", "1")).is_err());
        assert!(store.create(&draft("a", "1")).is_ok());
    }

    #[test]
    fn fetch_missing_document_is_an_error() {
        let store = RecordingStore::new();
        assert!(store.fetch(42).is_err());
    }
}
