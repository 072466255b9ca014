//! Data models shared between the editor session and the API client.

/// Document records and request payloads.
pub mod document;

#[cfg(test)]
mod tests;

pub use document::{Document, DocumentDraft, DocumentSummary};
