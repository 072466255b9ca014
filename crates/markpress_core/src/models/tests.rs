//! Wire-format tests for document models.

use super::document::{Document, DocumentDraft, DocumentSummary};
use chrono::{TimeZone, Utc};

#[test]
fn document_decodes_camel_case_wire_format() {
    let body = r##"{
        "id": 7,
        "userId": 3,
        "title": "Hello",
        "content": "# Hello\n",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-02T11:30:00Z"
    }"##;

    let document: Document = serde_json::from_str(body).expect("decode document");
    assert_eq!(document.id, 7);
    assert_eq!(document.user_id, Some(3));
    assert_eq!(document.title, "Hello");
    assert_eq!(document.content, "# Hello\n");
    assert_eq!(
        document.updated_at,
        Utc.with_ymd_and_hms(2024, 5, 2, 11, 30, 0).unwrap()
    );
}

#[test]
fn document_decodes_without_user_id() {
    let body = r#"{
        "id": 1,
        "title": "Bare",
        "content": "",
        "createdAt": "2024-05-01T10:00:00Z",
        "updatedAt": "2024-05-01T10:00:00Z"
    }"#;

    let document: Document = serde_json::from_str(body).expect("decode document");
    assert_eq!(document.user_id, None);
}

#[test]
fn draft_encodes_camel_case_payload() {
    let draft = DocumentDraft {
        title: "Untitled Article".to_string(),
        content: "body".to_string(),
    };
    let encoded = serde_json::to_value(&draft).expect("encode draft");
    assert_eq!(encoded["title"], "Untitled Article");
    assert_eq!(encoded["content"], "body");
}

#[test]
fn summary_from_document_copies_list_fields() {
    let document = Document {
        id: 9,
        user_id: None,
        title: "Summary".to_string(),
        content: "long body".to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
    };

    let summary = DocumentSummary::from_document(&document);
    assert_eq!(summary.id, 9);
    assert_eq!(summary.title, "Summary");
    assert_eq!(summary.updated_at, document.updated_at);
}
