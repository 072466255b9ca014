//! Protocol types for the editor backend worker.

use crate::autosave::SavePlan;
use markpress_core::models::{Document, DocumentDraft, DocumentSummary};

/// Commands issued by the editor session for the worker to execute.
#[derive(Debug)]
pub enum StoreCmd {
    /// Fetch summaries of the user's documents.
    ListDocuments,
    /// Load a single document by id for display in the editor.
    FetchDocument { id: i64 },
    /// Create a new document; the plan rides along for staleness checks.
    CreateDocument { plan: SavePlan, draft: DocumentDraft },
    /// Persist updated content for an existing document.
    UpdateDocument {
        plan: SavePlan,
        id: i64,
        draft: DocumentDraft,
    },
}

/// Events produced by the worker and pumped by the session.
#[derive(Debug)]
pub enum StoreEvent {
    /// Response containing the current document list.
    DocumentList { items: Vec<DocumentSummary> },
    /// Response containing the full document requested by id.
    DocumentLoaded { document: Document },
    /// Response containing a newly created document.
    DocumentCreated { plan: SavePlan, document: Document },
    /// Response confirming an existing document was updated.
    DocumentSaved { plan: SavePlan, document: Document },
    /// The requested document could not be loaded.
    LoadFailed { id: i64, message: String },
    /// A store failure occurred (network, server rejection, expired auth).
    Error {
        source: StoreErrorSource,
        message: String,
    },
}

/// Which request class an error belongs to.
///
/// Save errors carry their plan so the scheduler can resolve the matching
/// in-flight bookkeeping; unrelated failures must not touch it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreErrorSource {
    Save { plan: SavePlan },
    List,
}
