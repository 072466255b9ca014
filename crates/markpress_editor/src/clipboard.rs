//! Clipboard export of rendered artifacts.
//!
//! The exporter writes the styled-HTML representation and a plain-text
//! fallback in one clipboard transaction, so a paste target picks whichever
//! it understands and no partial payload is ever observable. Failure is a
//! boolean, never an error: callers surface a notification and leave the
//! document untouched.

use markpress_core::RenderedArtifact;
use thiserror::Error;
use tracing::warn;

/// Clipboard failures.
#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("clipboard unavailable")]
    Unavailable,

    #[error("clipboard write failed: {0}")]
    WriteFailed(String),
}

/// Capability seam over the platform clipboard.
///
/// A single call carries both representations so implementations can commit
/// them atomically.
pub trait ClipboardSink {
    /// Write one payload with rich and plain representations.
    fn write_rich(&mut self, html: &str, plain: &str) -> Result<(), ClipboardError>;
}

/// System clipboard backed by arboard.
pub struct SystemClipboard {
    clipboard: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    /// Connect to the system clipboard; absence is tolerated and reported as
    /// [`ClipboardError::Unavailable`] on write.
    pub fn new() -> Self {
        Self {
            clipboard: arboard::Clipboard::new().ok(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.clipboard.is_some()
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_rich(&mut self, html: &str, plain: &str) -> Result<(), ClipboardError> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or(ClipboardError::Unavailable)?;
        clipboard
            .set_html(html, Some(plain))
            .map_err(|err| ClipboardError::WriteFailed(err.to_string()))
    }
}

/// Recording sink for tests.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    /// Every committed (html, plain) payload, in order.
    pub writes: Vec<(String, String)>,
    /// Simulate a platform permission denial.
    pub deny: bool,
}

impl ClipboardSink for MemoryClipboard {
    fn write_rich(&mut self, html: &str, plain: &str) -> Result<(), ClipboardError> {
        if self.deny {
            return Err(ClipboardError::Unavailable);
        }
        self.writes.push((html.to_string(), plain.to_string()));
        Ok(())
    }
}

/// Serialize an artifact into the clipboard.
///
/// # Returns
/// `false` — never an error — when the artifact has no rendered content or
/// the sink rejects the write; `true` after the single atomic write landed.
pub fn export_artifact(artifact: &RenderedArtifact, sink: &mut dyn ClipboardSink) -> bool {
    if !artifact.has_content() {
        return false;
    }
    match sink.write_rich(&artifact.html, &artifact.plain_text) {
        Ok(()) => true,
        Err(err) => {
            warn!("clipboard export failed: {}", err);
            false
        }
    }
}
