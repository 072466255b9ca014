//! Session tests exercising autosave flow, document switching, rendering,
//! and clipboard export.

use super::*;
use crate::backend::{StoreCmd, StoreErrorSource, StoreEvent};
use crate::clipboard::MemoryClipboard;
use chrono::Utc;
use crossbeam_channel::{unbounded, Receiver, TryRecvError};
use markpress_core::models::Document;

struct TestSession {
    session: EditorSession,
    cmd_rx: Receiver<StoreCmd>,
}

const AUTOSAVE: Duration = Duration::from_millis(1000);

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

fn test_config() -> Config {
    Config {
        auto_save_interval: AUTOSAVE.as_millis() as u64,
        ..Config::default()
    }
}

fn make_session() -> TestSession {
    make_session_with_auth(AuthSession::authenticated("token"))
}

fn make_session_with_auth(auth: AuthSession) -> TestSession {
    let (cmd_tx, cmd_rx) = unbounded();
    let (_evt_tx, evt_rx) = unbounded();
    let session = EditorSession::new(
        &test_config(),
        auth,
        StoreHandle::from_test_channels(cmd_tx, evt_rx),
    );
    TestSession { session, cmd_rx }
}

fn make_session_with_document(id: i64, content: &str) -> TestSession {
    let mut harness = make_session();
    harness.session.select_document(id);
    match recv_cmd(&harness.cmd_rx) {
        StoreCmd::FetchDocument { id: requested } => assert_eq!(requested, id),
        other => panic!("unexpected command: {:?}", other),
    }
    harness.session.apply_event(
        StoreEvent::DocumentLoaded {
            document: document(id, "Alpha", content),
        },
        Instant::now(),
    );
    harness
}

fn document(id: i64, title: &str, content: &str) -> Document {
    let now = Utc::now();
    Document {
        id,
        user_id: Some(1),
        title: title.to_string(),
        content: content.to_string(),
        created_at: now,
        updated_at: now,
    }
}

fn recv_cmd(rx: &Receiver<StoreCmd>) -> StoreCmd {
    rx.recv_timeout(Duration::from_millis(200))
        .expect("expected outbound command")
}

fn assert_no_cmd(rx: &Receiver<StoreCmd>) {
    assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
}

mod document_switching;
