//! Document records as persisted by the remote article API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted article as returned by the remote API.
///
/// The wire format uses camelCase field names; identity is assigned by the
/// server. An unsaved local draft has no `Document` — the editor session
/// tracks its identity separately until the first create succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight summary used for document list rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub id: i64,
    pub title: String,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating or updating a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDraft {
    pub title: String,
    pub content: String,
}

impl DocumentSummary {
    /// Build a summary from a full document record.
    ///
    /// # Returns
    /// A lightweight struct containing the fields needed to render list rows.
    pub fn from_document(document: &Document) -> Self {
        Self {
            id: document.id,
            title: document.title.clone(),
            updated_at: document.updated_at,
        }
    }
}
