//! Built-in preview templates and user style overrides.
//!
//! Rich-text paste targets keep inline styles and drop everything else, so
//! templates are tables of per-element `style` attribute strings rather than
//! stylesheets.

use std::collections::BTreeMap;

/// A named set of inline styles applied to rendered elements.
#[derive(Debug)]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub root: &'static str,
    pub heading1: &'static str,
    pub heading2: &'static str,
    pub heading3: &'static str,
    pub paragraph: &'static str,
    pub blockquote: &'static str,
    pub code_block: &'static str,
    pub inline_code: &'static str,
    pub ordered_list: &'static str,
    pub unordered_list: &'static str,
    pub list_item: &'static str,
    pub link: &'static str,
    pub image: &'static str,
    pub strong: &'static str,
    pub emphasis: &'static str,
    pub rule: &'static str,
    pub table: &'static str,
    pub table_header: &'static str,
    pub table_cell: &'static str,
}

/// Built-in templates, first entry is the fallback.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: "default",
        name: "Default",
        root: "font-family:-apple-system,BlinkMacSystemFont,'Helvetica Neue',sans-serif;font-size:16px;line-height:1.75;color:#333;letter-spacing:0.05em",
        heading1: "font-size:24px;font-weight:bold;margin:32px 0 16px;color:#222",
        heading2: "font-size:20px;font-weight:bold;margin:28px 0 14px;color:#222;border-bottom:1px solid #eee;padding-bottom:6px",
        heading3: "font-size:17px;font-weight:bold;margin:24px 0 12px;color:#222",
        paragraph: "margin:0 0 16px;text-align:justify",
        blockquote: "margin:16px 0;padding:8px 16px;border-left:4px solid #dfe2e5;color:#6a737d;background:#f8f9fa",
        code_block: "margin:16px 0;padding:12px;background:#f6f8fa;border-radius:4px;font-family:Menlo,Consolas,monospace;font-size:14px;overflow-x:auto",
        inline_code: "padding:2px 5px;background:#f0f1f2;border-radius:3px;font-family:Menlo,Consolas,monospace;font-size:14px;color:#c7254e",
        ordered_list: "margin:0 0 16px;padding-left:28px",
        unordered_list: "margin:0 0 16px;padding-left:28px",
        list_item: "margin:4px 0",
        link: "color:#576b95;text-decoration:none",
        image: "max-width:100%;display:block;margin:16px auto;border-radius:4px",
        strong: "font-weight:bold",
        emphasis: "font-style:italic",
        rule: "border:none;border-top:1px solid #eee;margin:24px 0",
        table: "border-collapse:collapse;margin:16px 0;width:100%",
        table_header: "border:1px solid #dfe2e5;padding:8px 12px;background:#f6f8fa;font-weight:bold;text-align:left",
        table_cell: "border:1px solid #dfe2e5;padding:8px 12px",
    },
    Template {
        id: "elegant",
        name: "Elegant",
        root: "font-family:Georgia,'Songti SC',serif;font-size:16px;line-height:1.9;color:#40464f;letter-spacing:0.08em",
        heading1: "font-size:26px;font-weight:bold;margin:36px 0 18px;text-align:center;color:#2b2f36",
        heading2: "font-size:21px;font-weight:bold;margin:30px 0 15px;color:#2b2f36;text-align:center",
        heading3: "font-size:18px;font-weight:bold;margin:26px 0 13px;color:#2b2f36",
        paragraph: "margin:0 0 20px;text-align:justify",
        blockquote: "margin:20px 0;padding:12px 20px;border-left:3px solid #b8c2cc;color:#7a8794;font-style:italic",
        code_block: "margin:20px 0;padding:14px;background:#2d2d2d;color:#ccc;border-radius:6px;font-family:Menlo,Consolas,monospace;font-size:13px;overflow-x:auto",
        inline_code: "padding:2px 6px;background:#eef1f4;border-radius:3px;font-family:Menlo,Consolas,monospace;font-size:14px;color:#476582",
        ordered_list: "margin:0 0 20px;padding-left:32px",
        unordered_list: "margin:0 0 20px;padding-left:32px",
        list_item: "margin:6px 0",
        link: "color:#8c6e47;text-decoration:underline",
        image: "max-width:100%;display:block;margin:20px auto;box-shadow:0 2px 8px rgba(0,0,0,0.1)",
        strong: "font-weight:bold;color:#2b2f36",
        emphasis: "font-style:italic",
        rule: "border:none;text-align:center;border-top:1px dashed #c8d0d8;margin:32px 48px",
        table: "border-collapse:collapse;margin:20px 0;width:100%",
        table_header: "border:1px solid #d8dee4;padding:10px 14px;background:#f4f6f8;font-weight:bold;text-align:left",
        table_cell: "border:1px solid #d8dee4;padding:10px 14px",
    },
    Template {
        id: "compact",
        name: "Compact",
        root: "font-family:-apple-system,BlinkMacSystemFont,sans-serif;font-size:15px;line-height:1.6;color:#24292e",
        heading1: "font-size:21px;font-weight:bold;margin:20px 0 10px",
        heading2: "font-size:18px;font-weight:bold;margin:18px 0 9px",
        heading3: "font-size:16px;font-weight:bold;margin:16px 0 8px",
        paragraph: "margin:0 0 10px",
        blockquote: "margin:10px 0;padding:4px 12px;border-left:3px solid #d0d7de;color:#57606a",
        code_block: "margin:10px 0;padding:10px;background:#f6f8fa;border-radius:3px;font-family:Menlo,Consolas,monospace;font-size:13px;overflow-x:auto",
        inline_code: "padding:1px 4px;background:#eff1f3;border-radius:3px;font-family:Menlo,Consolas,monospace;font-size:13px",
        ordered_list: "margin:0 0 10px;padding-left:24px",
        unordered_list: "margin:0 0 10px;padding-left:24px",
        list_item: "margin:2px 0",
        link: "color:#0969da;text-decoration:none",
        image: "max-width:100%;margin:10px 0",
        strong: "font-weight:bold",
        emphasis: "font-style:italic",
        rule: "border:none;border-top:1px solid #d0d7de;margin:16px 0",
        table: "border-collapse:collapse;margin:10px 0",
        table_header: "border:1px solid #d0d7de;padding:5px 10px;background:#f6f8fa;font-weight:bold;text-align:left",
        table_cell: "border:1px solid #d0d7de;padding:5px 10px",
    },
];

impl Template {
    /// Look up a built-in template, falling back to the default one.
    ///
    /// # Returns
    /// The matching [`Template`], or the first built-in when `id` is unknown.
    pub fn by_id(id: &str) -> &'static Template {
        TEMPLATES
            .iter()
            .find(|template| template.id == id)
            .unwrap_or(&TEMPLATES[0])
    }

    /// Style string for a heading of the given level (4-6 reuse level 3).
    pub fn heading(&self, level: u8) -> &'static str {
        match level {
            1 => self.heading1,
            2 => self.heading2,
            _ => self.heading3,
        }
    }
}

/// Sparse per-document style overrides layered on top of a template.
///
/// Keys are CSS property names; values are appended after the template's
/// base style so the override wins. `BTreeMap` keeps iteration order (and
/// therefore rendered output) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleOptions(BTreeMap<String, String>);

impl StyleOptions {
    /// Create an empty override set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a single override.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.0.insert(property.into(), value.into());
    }

    /// Remove every override.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge a base style string with these overrides.
    ///
    /// # Returns
    /// `base` followed by `;prop:value` pairs in key order.
    pub fn apply_to(&self, base: &str) -> String {
        let mut merged = base.to_string();
        for (property, value) in &self.0 {
            if !merged.is_empty() {
                merged.push(';');
            }
            merged.push_str(property);
            merged.push(':');
            merged.push_str(value);
        }
        merged
    }

    /// Stable textual fingerprint used in artifact cache keys.
    pub fn fingerprint(&self) -> String {
        let mut out = String::new();
        for (property, value) in &self.0 {
            out.push_str(property);
            out.push('=');
            out.push_str(value);
            out.push(';');
        }
        out
    }
}

impl FromIterator<(String, String)> for StyleOptions {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{StyleOptions, Template, TEMPLATES};

    #[test]
    fn unknown_template_falls_back_to_default() {
        assert_eq!(Template::by_id("no-such-template").id, TEMPLATES[0].id);
        assert_eq!(Template::by_id("elegant").id, "elegant");
    }

    #[test]
    fn style_options_apply_in_key_order() {
        let mut options = StyleOptions::new();
        options.set("text-align", "left");
        options.set("font-size", "18px");
        assert_eq!(
            options.apply_to("margin:0"),
            "margin:0;font-size:18px;text-align:left"
        );
        assert_eq!(options.fingerprint(), "font-size=18px;text-align=left;");
    }

    #[test]
    fn style_options_apply_to_empty_base() {
        let mut options = StyleOptions::new();
        options.set("color", "#111");
        assert_eq!(options.apply_to(""), "color:#111");
    }
}
