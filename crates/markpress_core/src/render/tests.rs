//! Render pipeline behavior tests: determinism, totality, caching, anchors.

use super::{RenderInput, RenderPipeline, StyleOptions};
use std::sync::Arc;

fn input<'a>(source: &'a str, options: &'a StyleOptions) -> RenderInput<'a> {
    RenderInput {
        source,
        template_id: "default",
        style_options: options,
        code_theme_id: "github",
    }
}

#[test]
fn render_is_deterministic_across_pipelines() {
    let source = "# Title\n\nSome *styled* text with `code`.\n\n```rust\nfn main() {}\n```\n";
    let options = StyleOptions::new();

    let first = RenderPipeline::new().render(&input(source, &options));
    let second = RenderPipeline::new().render(&input(source, &options));

    assert_eq!(first.html, second.html);
    assert_eq!(first.plain_text, second.plain_text);
    assert_eq!(first.word_count, second.word_count);
    assert_eq!(first.anchors, second.anchors);
}

#[test]
fn repeated_render_returns_the_cached_artifact() {
    let source = "paragraph one\n\nparagraph two\n";
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();

    let first = pipeline.render(&input(source, &options));
    let second = pipeline.render(&input(source, &options));

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.word_count, second.word_count);
    assert_eq!(first.reading_time, second.reading_time);
}

#[test]
fn changing_any_input_invalidates_the_cache() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let base = pipeline.render(&input("hello world", &options));

    let edited = pipeline.render(&input("hello worlds", &options));
    assert!(!Arc::ptr_eq(&base, &edited));

    let mut overrides = StyleOptions::new();
    overrides.set("font-size", "18px");
    let styled = pipeline.render(&RenderInput {
        source: "hello worlds",
        template_id: "default",
        style_options: &overrides,
        code_theme_id: "github",
    });
    assert!(!Arc::ptr_eq(&edited, &styled));
    assert!(styled.html.contains("font-size:18px"));
}

#[test]
fn artifact_identity_tracks_inputs() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let artifact = pipeline.render(&input("stale check", &options));

    assert!(artifact.is_current_for(&input("stale check", &options)));
    assert!(!artifact.is_current_for(&input("stale check edited", &options)));
}

#[test]
fn unknown_template_and_theme_fall_back_without_error() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let fallback = pipeline.render(&RenderInput {
        source: "# ok",
        template_id: "no-such-template",
        style_options: &options,
        code_theme_id: "no-such-theme",
    });
    let default = pipeline.render(&input("# ok", &options));
    assert_eq!(fallback.html, default.html);
}

#[test]
fn raw_html_renders_as_escaped_literal_text() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let artifact = pipeline.render(&input("<script>alert(1)</script>\n\nafter\n", &options));

    assert!(!artifact.html.contains("<script>"));
    assert!(artifact.html.contains("&lt;script&gt;"));
}

#[test]
fn malformed_markdown_never_panics() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    for source in [
        "",
        "```",
        "```\nunclosed fence",
        "[broken link](",
        "![](",
        "| a | b |\n|---|",
        "*unbalanced **emphasis",
        "> \n> ```\n> nested",
    ] {
        let artifact = pipeline.render(&input(source, &options));
        assert!(artifact.html.starts_with("<section"));
        assert!(artifact.html.ends_with("</section>"));
    }
}

#[test]
fn empty_source_has_no_content_and_no_anchors() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let artifact = pipeline.render(&input("", &options));

    assert!(!artifact.has_content());
    assert!(artifact.anchors.is_empty());
    assert_eq!(artifact.word_count, 0);
}

#[test]
fn word_count_ignores_markup() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let artifact = pipeline.render(&input("# One **two** [three](http://x)\n", &options));

    assert_eq!(artifact.word_count, 3);
    assert_eq!(artifact.reading_time, "1 min read");
}

#[test]
fn fenced_code_with_unknown_language_renders_escaped() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let artifact = pipeline.render(&input("```nosuchlang\na < b\n```\n", &options));

    assert!(artifact.html.contains("a &lt; b"));
}

#[test]
fn anchors_are_normalized_and_ordered() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let artifact = pipeline.render(&input(
        "# First\n\nparagraph\n\n## Second\n\nanother paragraph\n\n---\n",
        &options,
    ));

    assert!(artifact.anchors.len() >= 4);
    let mut previous = (0.0f32, 0.0f32);
    for anchor in &artifact.anchors {
        assert!((0.0..=1.0).contains(&anchor.source));
        assert!((0.0..=1.0).contains(&anchor.preview));
        assert!(anchor.source >= previous.0);
        assert!(anchor.preview >= previous.1);
        previous = (anchor.source, anchor.preview);
    }
}

#[test]
fn inline_styles_come_from_the_selected_template() {
    let options = StyleOptions::new();
    let mut pipeline = RenderPipeline::new();
    let default = pipeline.render(&input("plain paragraph", &options));
    assert!(default.html.contains("<p style=\""));

    let compact = pipeline.render(&RenderInput {
        source: "plain paragraph",
        template_id: "compact",
        style_options: &options,
        code_theme_id: "github",
    });
    assert_ne!(default.html, compact.html);
}
