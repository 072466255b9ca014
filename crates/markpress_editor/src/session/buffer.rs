//! Source buffer with a monotonic edit revision counter.

/// Tracks the current document source text and a simple revision counter.
#[derive(Debug, Default)]
pub(super) struct SourceBuffer {
    text: String,
    revision: u64,
}

impl SourceBuffer {
    /// Replace buffer contents and reset revision tracking (document switch).
    pub(super) fn reset(&mut self, text: String) {
        self.text = text;
        self.revision = 0;
    }

    /// Apply an edit, bumping the revision counter.
    pub(super) fn set(&mut self, text: String) {
        self.text = text;
        self.revision = self.revision.wrapping_add(1);
    }

    /// Current text as `&str`.
    pub(super) fn as_str(&self) -> &str {
        self.text.as_str()
    }

    /// Monotonic edit revision, reset on document switch.
    pub(super) fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::SourceBuffer;

    #[test]
    fn set_bumps_revision_and_reset_clears_it() {
        let mut buffer = SourceBuffer::default();
        buffer.set("a".to_string());
        buffer.set("ab".to_string());
        assert_eq!(buffer.revision(), 2);
        assert_eq!(buffer.as_str(), "ab");

        buffer.reset("fresh".to_string());
        assert_eq!(buffer.revision(), 0);
        assert_eq!(buffer.as_str(), "fresh");
    }
}
