//! Background worker thread for remote store access.

use super::protocol::{StoreCmd, StoreErrorSource, StoreEvent};
use crate::autosave::SavePlan;
use crossbeam_channel::{unbounded, Receiver, Sender};
use markpress_client::{ClientError, DocumentStore};
use markpress_core::models::DocumentDraft;
use std::thread;
use tracing::{error, info};

/// Handle for sending commands to, and receiving events from, the worker.
pub struct StoreHandle {
    pub cmd_tx: Sender<StoreCmd>,
    pub evt_rx: Receiver<StoreEvent>,
}

impl StoreHandle {
    /// Build a handle around externally owned channels, for session tests.
    pub fn from_test_channels(cmd_tx: Sender<StoreCmd>, evt_rx: Receiver<StoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// Spawn the worker thread that performs blocking store calls.
///
/// All network I/O stays off the session's logical thread; the worker
/// processes commands strictly in order (so at most one save per document is
/// ever outstanding) and replies with [`StoreEvent`] values the session
/// pumps between actions.
///
/// # Returns
/// A [`StoreHandle`] containing the command sender and event receiver.
///
/// # Panics
/// Panics if the worker thread cannot be spawned.
pub fn spawn_store_worker(store: Box<dyn DocumentStore>) -> StoreHandle {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();

    thread::Builder::new()
        .name("markpress-store".to_string())
        .spawn(move || {
            for cmd in cmd_rx.iter() {
                match cmd {
                    StoreCmd::ListDocuments => handle_list(store.as_ref(), &evt_tx),
                    StoreCmd::FetchDocument { id } => handle_fetch(store.as_ref(), &evt_tx, id),
                    StoreCmd::CreateDocument { plan, draft } => {
                        handle_create(store.as_ref(), &evt_tx, plan, draft)
                    }
                    StoreCmd::UpdateDocument { plan, id, draft } => {
                        handle_update(store.as_ref(), &evt_tx, plan, id, draft)
                    }
                }
            }
            info!("store worker shut down");
        })
        .expect("spawn store worker");

    StoreHandle { cmd_tx, evt_rx }
}

fn save_error_message(err: &ClientError) -> String {
    match err {
        ClientError::Unauthorized => "Save failed: sign in to save your work.".to_string(),
        other => format!("Save failed: {}", other),
    }
}

fn handle_list(store: &dyn DocumentStore, evt_tx: &Sender<StoreEvent>) {
    match store.list() {
        Ok(items) => {
            let _ = evt_tx.send(StoreEvent::DocumentList { items });
        }
        Err(err) => {
            error!("store list failed: {}", err);
            let message = match err {
                ClientError::Unauthorized => "List failed: sign in to load your documents.".to_string(),
                other => format!("List failed: {}", other),
            };
            let _ = evt_tx.send(StoreEvent::Error {
                source: StoreErrorSource::List,
                message,
            });
        }
    }
}

fn handle_fetch(store: &dyn DocumentStore, evt_tx: &Sender<StoreEvent>, id: i64) {
    match store.fetch(id) {
        Ok(document) => {
            let _ = evt_tx.send(StoreEvent::DocumentLoaded { document });
        }
        Err(err) => {
            error!("store fetch failed for {}: {}", id, err);
            let _ = evt_tx.send(StoreEvent::LoadFailed {
                id,
                message: format!("Load failed: {}", err),
            });
        }
    }
}

fn handle_create(
    store: &dyn DocumentStore,
    evt_tx: &Sender<StoreEvent>,
    plan: SavePlan,
    draft: DocumentDraft,
) {
    match store.create(&draft) {
        Ok(document) => {
            let _ = evt_tx.send(StoreEvent::DocumentCreated { plan, document });
        }
        Err(err) => {
            error!("store create failed: {}", err);
            let message = save_error_message(&err);
            let _ = evt_tx.send(StoreEvent::Error {
                source: StoreErrorSource::Save { plan },
                message,
            });
        }
    }
}

fn handle_update(
    store: &dyn DocumentStore,
    evt_tx: &Sender<StoreEvent>,
    plan: SavePlan,
    id: i64,
    draft: DocumentDraft,
) {
    match store.update(id, &draft) {
        Ok(document) => {
            let _ = evt_tx.send(StoreEvent::DocumentSaved { plan, document });
        }
        Err(err) => {
            error!("store update failed for {}: {}", id, err);
            let message = save_error_message(&err);
            let _ = evt_tx.send(StoreEvent::Error {
                source: StoreErrorSource::Save { plan },
                message,
            });
        }
    }
}
