//! Client error types for the remote article API.

use thiserror::Error;

/// Failures surfaced by the persistence collaborator.
///
/// The editor treats every variant uniformly as "save/load failed" and keeps
/// the document dirty for retry; only [`ClientError::Unauthorized`] gets a
/// distinct sign-in prompt.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server rejected request ({code}): {message}")]
    Api { code: i64, message: String },

    #[error("authentication required")]
    Unauthorized,

    #[error("malformed server response: {0}")]
    Decode(String),
}
