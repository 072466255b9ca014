//! Source/preview scroll position mapping.
//!
//! The rendered preview grows and shrinks differently from the source
//! (headings, code blocks, and images expand at different rates), so a plain
//! character-ratio mapping drifts. The mapping interpolates between block
//! anchors shared by both sides and falls back to the pure ratio when no
//! anchors exist.

/// A normalized block boundary present in both the source and the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// Position in the source buffer, 0.0-1.0.
    pub source: f32,
    /// Position in the rendered preview, 0.0-1.0.
    pub preview: f32,
}

/// The two scrollable panes kept in sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Source,
    Preview,
}

impl Pane {
    fn counterpart(self) -> Pane {
        match self {
            Pane::Source => Pane::Preview,
            Pane::Preview => Pane::Source,
        }
    }
}

/// Piecewise-linear mapping between source and preview scroll fractions.
#[derive(Debug, Clone, Default)]
pub struct ScrollMapping {
    /// Sanitized anchors: clamped to [0,1] and non-decreasing on both axes.
    anchors: Vec<Anchor>,
}

impl ScrollMapping {
    /// Build a mapping from an artifact's anchors.
    ///
    /// Anchors are clamped against their predecessor on both axes so the
    /// mapping is monotonic by construction; an empty anchor list yields the
    /// identity (pure ratio) mapping.
    pub fn new(anchors: &[Anchor]) -> Self {
        let mut sanitized: Vec<Anchor> = Vec::with_capacity(anchors.len());
        let mut last = Anchor {
            source: 0.0,
            preview: 0.0,
        };
        for anchor in anchors {
            let clamped = Anchor {
                source: anchor.source.clamp(last.source, 1.0),
                preview: anchor.preview.clamp(last.preview, 1.0),
            };
            sanitized.push(clamped);
            last = clamped;
        }
        Self { anchors: sanitized }
    }

    /// Map a source scroll fraction to the matching preview fraction.
    pub fn to_preview_fraction(&self, fraction: f32) -> f32 {
        interpolate(&self.anchors, fraction, |anchor| {
            (anchor.source, anchor.preview)
        })
    }

    /// Map a preview scroll fraction to the matching source fraction.
    pub fn to_source_fraction(&self, fraction: f32) -> f32 {
        interpolate(&self.anchors, fraction, |anchor| {
            (anchor.preview, anchor.source)
        })
    }
}

/// Piecewise-linear interpolation through (0,0), the anchor pairs, and (1,1).
fn interpolate(anchors: &[Anchor], fraction: f32, project: impl Fn(&Anchor) -> (f32, f32)) -> f32 {
    let fraction = if fraction.is_finite() {
        fraction.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let (mut from_x, mut from_y) = (0.0f32, 0.0f32);
    for anchor in anchors {
        let (x, y) = project(anchor);
        if fraction <= x {
            return segment_value(from_x, from_y, x, y, fraction);
        }
        from_x = x;
        from_y = y;
    }
    segment_value(from_x, from_y, 1.0, 1.0, fraction)
}

fn segment_value(from_x: f32, from_y: f32, to_x: f32, to_y: f32, at: f32) -> f32 {
    let span = to_x - from_x;
    if span <= f32::EPSILON {
        // Degenerate segment; either endpoint keeps the mapping monotonic.
        return from_y;
    }
    let t = (at - from_x) / span;
    (from_y + (to_y - from_y) * t).clamp(0.0, 1.0)
}

/// Keeps two panes aligned while suppressing synchronization echo.
///
/// When one pane is moved programmatically, the next scroll event reported
/// from that pane is tagged as self-originated and ignored exactly once, so a
/// sync never re-triggers an opposite-direction sync.
#[derive(Debug, Default)]
pub struct ScrollSynchronizer {
    suppressed: Option<Pane>,
}

impl ScrollSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a scroll event observed in `pane` at `fraction`.
    ///
    /// # Returns
    /// The counterpart pane and the fraction it should be moved to, or `None`
    /// when the event was the echo of a previous synchronization.
    pub fn note_scroll(
        &mut self,
        pane: Pane,
        fraction: f32,
        mapping: &ScrollMapping,
    ) -> Option<(Pane, f32)> {
        if self.suppressed == Some(pane) {
            self.suppressed = None;
            return None;
        }

        let target = match pane {
            Pane::Source => mapping.to_preview_fraction(fraction),
            Pane::Preview => mapping.to_source_fraction(fraction),
        };
        let counterpart = pane.counterpart();
        self.suppressed = Some(counterpart);
        Some((counterpart, target))
    }

    /// Drop any armed suppression (used when the preview is rebuilt).
    pub fn reset(&mut self) {
        self.suppressed = None;
    }
}
