//! Document selection, discard-draft, and cross-document staleness guards.

use super::*;
use markpress_core::models::DocumentSummary;

#[test]
fn select_document_fetches_and_applies_the_loaded_content() {
    let mut harness = make_session();
    harness.session.select_document(7);
    match recv_cmd(&harness.cmd_rx) {
        StoreCmd::FetchDocument { id } => assert_eq!(id, 7),
        other => panic!("unexpected command: {:?}", other),
    }

    harness.session.apply_event(
        StoreEvent::DocumentLoaded {
            document: document(7, "Notes", "# Notes\n"),
        },
        Instant::now(),
    );

    assert_eq!(harness.session.source_text(), "# Notes\n");
    assert_eq!(harness.session.title(), "Notes");
    assert_eq!(harness.session.save_state(), SaveState::Clean);
    assert!(!harness.session.is_draft());
    assert_eq!(harness.session.status_text(), Some("Loaded \"Notes\"."));
}

#[test]
fn selecting_the_open_document_is_a_no_op() {
    let mut harness = make_session_with_document(7, "content");
    harness.session.select_document(7);
    assert_no_cmd(&harness.cmd_rx);
    assert_eq!(harness.session.source_text(), "content");
}

#[test]
fn loaded_event_for_a_different_document_is_ignored() {
    let mut harness = make_session_with_document(7, "current");
    harness.session.apply_event(
        StoreEvent::DocumentLoaded {
            document: document(9, "Other", "other content"),
        },
        Instant::now(),
    );

    assert_eq!(harness.session.source_text(), "current");
    assert_eq!(harness.session.selected_id(), Some(7));
}

#[test]
fn save_completion_from_a_previous_document_is_ignored() {
    let mut harness = make_session();
    let t0 = Instant::now();
    harness.session.edit("first doc".to_string(), t0);
    harness.session.tick(t0 + AUTOSAVE + ms(1));
    let plan = match recv_cmd(&harness.cmd_rx) {
        StoreCmd::CreateDocument { plan, .. } => plan,
        other => panic!("unexpected command: {:?}", other),
    };

    // Switch away while the create is still in flight.
    harness.session.select_document(7);
    match recv_cmd(&harness.cmd_rx) {
        StoreCmd::FetchDocument { id } => assert_eq!(id, 7),
        other => panic!("unexpected command: {:?}", other),
    }

    harness.session.apply_event(
        StoreEvent::DocumentCreated {
            plan,
            document: document(3, "Untitled Article", "first doc"),
        },
        t0 + AUTOSAVE + ms(50),
    );

    // The old save resolves but must not touch the newly active document.
    assert_eq!(harness.session.selected_id(), Some(7));
    assert_eq!(harness.session.save_state(), SaveState::Clean);
    assert!(harness.session.documents().is_empty());
}

#[test]
fn discard_draft_without_identity_clears_to_empty_clean() {
    let mut harness = make_session();
    harness
        .session
        .edit("unsaved text".to_string(), Instant::now());
    assert!(harness.session.is_draft());

    harness.session.discard_draft();

    assert_eq!(harness.session.source_text(), "");
    assert_eq!(harness.session.save_state(), SaveState::Clean);
    assert!(!harness.session.is_draft());
    assert_no_cmd(&harness.cmd_rx);
    assert_eq!(harness.session.status_text(), Some("Draft discarded."));
}

#[test]
fn discard_draft_with_identity_restores_the_persisted_copy() {
    let mut harness = make_session_with_document(7, "persisted");
    harness
        .session
        .edit("persisted plus edits".to_string(), Instant::now());
    assert!(harness.session.is_draft());

    harness.session.discard_draft();
    match recv_cmd(&harness.cmd_rx) {
        StoreCmd::FetchDocument { id } => assert_eq!(id, 7),
        other => panic!("unexpected command: {:?}", other),
    }
    assert_eq!(harness.session.save_state(), SaveState::Clean);

    harness.session.apply_event(
        StoreEvent::DocumentLoaded {
            document: document(7, "Alpha", "persisted"),
        },
        Instant::now(),
    );
    assert_eq!(harness.session.source_text(), "persisted");
    assert!(!harness.session.is_draft());
}

#[test]
fn new_document_resets_editing_state() {
    let mut harness = make_session_with_document(7, "old content");
    harness
        .session
        .edit("old content edited".to_string(), Instant::now());

    harness.session.new_document();

    assert_eq!(harness.session.selected_id(), None);
    assert_eq!(harness.session.source_text(), "");
    assert_eq!(harness.session.title(), "Untitled Article");
    assert_eq!(harness.session.save_state(), SaveState::Clean);
}

#[test]
fn document_list_events_replace_the_summary_list() {
    let mut harness = make_session();
    harness.session.apply_event(
        StoreEvent::DocumentList {
            items: vec![
                DocumentSummary {
                    id: 2,
                    title: "Newest".to_string(),
                    updated_at: Utc::now(),
                },
                DocumentSummary {
                    id: 1,
                    title: "Older".to_string(),
                    updated_at: Utc::now(),
                },
            ],
        },
        Instant::now(),
    );

    let titles: Vec<&str> = harness
        .session
        .documents()
        .iter()
        .map(|summary| summary.title.as_str())
        .collect();
    assert_eq!(titles, vec!["Newest", "Older"]);
}

#[test]
fn refresh_documents_requires_authentication() {
    let mut harness = make_session_with_auth(AuthSession::anonymous());
    harness.session.refresh_documents();
    assert_no_cmd(&harness.cmd_rx);
    assert_eq!(
        harness.session.status_text(),
        Some("Sign in to load your documents.")
    );

    let mut harness = make_session();
    harness.session.refresh_documents();
    assert!(matches!(
        recv_cmd(&harness.cmd_rx),
        StoreCmd::ListDocuments
    ));
}
