//! Code-block highlighting themes backed by syntect's default theme set.

use super::template::{StyleOptions, Template};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;
use tracing::warn;

/// A selectable code highlighting theme.
#[derive(Debug)]
pub struct CodeTheme {
    pub id: &'static str,
    pub name: &'static str,
    syntect_name: &'static str,
}

/// Built-in code themes, first entry is the fallback.
pub const CODE_THEMES: &[CodeTheme] = &[
    CodeTheme {
        id: "github",
        name: "GitHub",
        syntect_name: "InspiredGitHub",
    },
    CodeTheme {
        id: "ocean-dark",
        name: "Ocean Dark",
        syntect_name: "base16-ocean.dark",
    },
    CodeTheme {
        id: "solarized",
        name: "Solarized Light",
        syntect_name: "Solarized (light)",
    },
];

impl CodeTheme {
    /// Look up a built-in code theme, falling back to the default one.
    ///
    /// # Returns
    /// The matching [`CodeTheme`], or the first built-in when `id` is unknown.
    pub fn by_id(id: &str) -> &'static CodeTheme {
        CODE_THEMES
            .iter()
            .find(|theme| theme.id == id)
            .unwrap_or(&CODE_THEMES[0])
    }
}

/// Render a fenced code block as inline-styled HTML.
///
/// Highlights with syntect when the language token is recognized; any
/// lookup or highlighting failure degrades to an escaped plain block so the
/// pipeline stays total.
///
/// # Returns
/// A self-contained `<pre>` fragment.
pub(crate) fn highlight_code_block(
    code: &str,
    language: Option<&str>,
    theme: &CodeTheme,
    syntaxes: &SyntaxSet,
    themes: &ThemeSet,
    template: &Template,
    options: &StyleOptions,
) -> String {
    if let Some(token) = language.filter(|token| !token.is_empty()) {
        if let (Some(syntax), Some(highlight_theme)) = (
            syntaxes.find_syntax_by_token(token),
            themes.themes.get(theme.syntect_name),
        ) {
            match highlighted_html_for_string(code, syntaxes, syntax, highlight_theme) {
                Ok(html) => return html,
                Err(err) => {
                    warn!("highlighting failed for language '{}': {}", token, err);
                }
            }
        }
    }

    let style = options.apply_to(template.code_block);
    format!(
        "<pre style=\"{}\"><code>{}</code></pre>",
        html_escape::encode_double_quoted_attribute(&style),
        html_escape::encode_text(code)
    )
}
