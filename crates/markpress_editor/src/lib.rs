//! Editor session runtime for Markpress.
//!
//! Ties the core render pipeline to the remote document store: a debounced
//! auto-save state machine, a backend worker thread for blocking store
//! access, the clipboard exporter, and the [`EditorSession`] that owns the
//! live document.

/// Debounced auto-save state machine.
pub mod autosave;
/// Backend worker wiring and the command/event protocol.
pub mod backend;
/// Clipboard export of rendered artifacts.
pub mod clipboard;
/// The editor session and its user-facing actions.
pub mod session;

pub use autosave::{AutoSaveScheduler, ManualSave, SavePlan, SaveState};
pub use backend::{spawn_store_worker, StoreCmd, StoreErrorSource, StoreEvent, StoreHandle};
pub use clipboard::{
    export_artifact, ClipboardError, ClipboardSink, MemoryClipboard, SystemClipboard,
};
pub use session::EditorSession;
