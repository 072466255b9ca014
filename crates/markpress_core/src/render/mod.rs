//! Deterministic markdown-to-styled-HTML render pipeline.
//!
//! `render` is a pure function of (source, template, style options, code
//! theme). The pipeline memoizes the last artifact by a structural key so
//! per-keystroke calls skip recomputation when nothing changed, and the
//! artifact itself is `Arc`-shared and replaced atomically.

mod markdown;
mod stats;
mod template;
mod theme;

#[cfg(test)]
mod tests;

pub use stats::{reading_time_label, word_count};
pub use template::{StyleOptions, Template, TEMPLATES};
pub use theme::{CodeTheme, CODE_THEMES};

use crate::scroll::Anchor;
use markdown::render_markdown;
use std::sync::Arc;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

/// Inputs identifying one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub source: &'a str,
    pub template_id: &'a str,
    pub style_options: &'a StyleOptions,
    pub code_theme_id: &'a str,
}

/// Structural identity of an artifact; equal keys imply byte-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ArtifactKey(blake3::Hash);

impl ArtifactKey {
    fn of(input: &RenderInput<'_>) -> Self {
        // Hash the effective inputs: unknown template/theme ids collapse onto
        // their fallbacks, so equivalent inputs share one cache entry.
        let template = Template::by_id(input.template_id);
        let theme = CodeTheme::by_id(input.code_theme_id);
        let mut hasher = blake3::Hasher::new();
        hasher.update(input.source.as_bytes());
        hasher.update(&[0xff]);
        hasher.update(template.id.as_bytes());
        hasher.update(&[0xff]);
        hasher.update(input.style_options.fingerprint().as_bytes());
        hasher.update(&[0xff]);
        hasher.update(theme.id.as_bytes());
        Self(hasher.finalize())
    }
}

/// Cached result of rendering one source snapshot.
#[derive(Debug)]
pub struct RenderedArtifact {
    key: ArtifactKey,
    /// Styled HTML fragment rooted at a single `<section>` element.
    pub html: String,
    /// Markup-stripped text, used for stats and the clipboard fallback.
    pub plain_text: String,
    pub word_count: usize,
    pub reading_time: String,
    /// Normalized block boundaries shared between source and output.
    pub anchors: Vec<Anchor>,
}

impl RenderedArtifact {
    /// Whether this artifact was rendered from exactly these inputs.
    ///
    /// The view layer calls this before committing an artifact so a stale
    /// render can never be displayed over newer source text.
    pub fn is_current_for(&self, input: &RenderInput<'_>) -> bool {
        self.key == ArtifactKey::of(input)
    }

    /// Whether the artifact contains any rendered content.
    pub fn has_content(&self) -> bool {
        !self.plain_text.trim().is_empty()
    }
}

/// Memoizing render pipeline; owns the loaded syntax and theme sets.
pub struct RenderPipeline {
    syntaxes: SyntaxSet,
    themes: ThemeSet,
    cached: Option<Arc<RenderedArtifact>>,
}

impl RenderPipeline {
    /// Construct a pipeline with syntect's default syntaxes and themes.
    pub fn new() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
            themes: ThemeSet::load_defaults(),
            cached: None,
        }
    }

    /// Render `input` into a styled artifact, reusing the cached artifact
    /// when the structural key is unchanged.
    ///
    /// Total over all string inputs; malformed markdown renders as escaped
    /// literal text.
    ///
    /// # Returns
    /// A shared handle to the (possibly cached) [`RenderedArtifact`].
    pub fn render(&mut self, input: &RenderInput<'_>) -> Arc<RenderedArtifact> {
        let key = ArtifactKey::of(input);
        if let Some(cached) = &self.cached {
            if cached.key == key {
                return Arc::clone(cached);
            }
        }

        let template = Template::by_id(input.template_id);
        let theme = CodeTheme::by_id(input.code_theme_id);
        let output = render_markdown(
            input.source,
            template,
            input.style_options,
            theme,
            &self.syntaxes,
            &self.themes,
        );

        let words = word_count(&output.plain_text);
        let anchors = normalize_anchors(&output, input.source.len());
        let artifact = Arc::new(RenderedArtifact {
            key,
            reading_time: reading_time_label(words),
            word_count: words,
            plain_text: output.plain_text,
            anchors,
            html: output.html,
        });
        self.cached = Some(Arc::clone(&artifact));
        artifact
    }

    /// The most recently rendered artifact, if any.
    pub fn cached(&self) -> Option<&Arc<RenderedArtifact>> {
        self.cached.as_ref()
    }
}

impl Default for RenderPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_anchors(output: &markdown::MarkdownOutput, source_len: usize) -> Vec<Anchor> {
    if source_len == 0 || output.html.is_empty() {
        return Vec::new();
    }
    let html_len = output.html.len() as f32;
    let src_len = source_len as f32;
    output
        .anchors
        .iter()
        .map(|raw| Anchor {
            source: (raw.source_offset as f32 / src_len).clamp(0.0, 1.0),
            preview: (raw.html_offset as f32 / html_len).clamp(0.0, 1.0),
        })
        .collect()
}
