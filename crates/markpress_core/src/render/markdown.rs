//! Markdown event walk producing inline-styled HTML, plain text, and block
//! anchors in a single pass.

use super::template::{StyleOptions, Template};
use super::theme::{highlight_code_block, CodeTheme};
use html_escape::{encode_double_quoted_attribute, encode_text};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

/// Raw single-pass render result before stats and normalization.
pub(crate) struct MarkdownOutput {
    pub html: String,
    pub plain_text: String,
    pub anchors: Vec<RawAnchor>,
}

/// Byte positions of a top-level block boundary in source and output.
pub(crate) struct RawAnchor {
    pub source_offset: usize,
    pub html_offset: usize,
}

struct PendingImage {
    dest: String,
    title: String,
    alt: String,
}

fn style_attr(base: &str, options: &StyleOptions) -> String {
    let merged = options.apply_to(base);
    if merged.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", encode_double_quoted_attribute(&merged))
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn end_plain_block(plain: &mut String) {
    if !plain.is_empty() && !plain.ends_with('\n') {
        plain.push('\n');
    }
}

/// Render markdown source into a styled-HTML fragment.
///
/// Total over all inputs: raw HTML and unrecognized constructs degrade to
/// escaped literal text instead of failing. Anchors are recorded at every
/// top-level block boundary for scroll mapping.
pub(crate) fn render_markdown(
    source: &str,
    template: &Template,
    options: &StyleOptions,
    theme: &CodeTheme,
    syntaxes: &SyntaxSet,
    themes: &ThemeSet,
) -> MarkdownOutput {
    let mut md_options = Options::empty();
    md_options.insert(Options::ENABLE_STRIKETHROUGH);
    md_options.insert(Options::ENABLE_TABLES);
    md_options.insert(Options::ENABLE_TASKLISTS);

    let mut html = String::with_capacity(source.len() * 2 + 128);
    let mut plain = String::with_capacity(source.len());
    let mut anchors: Vec<RawAnchor> = Vec::new();

    html.push_str("<section");
    html.push_str(&style_attr(template.root, options));
    html.push('>');

    // Depth of open block-level tags; anchors are only taken at depth zero.
    let mut block_depth = 0usize;
    let mut code_block: Option<(Option<String>, String)> = None;
    let mut image: Option<PendingImage> = None;
    let mut in_table_head = false;

    for (event, range) in Parser::new_ext(source, md_options).into_offset_iter() {
        match event {
            Event::Start(tag) => match tag {
                Tag::Paragraph => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    html.push_str("<p");
                    html.push_str(&style_attr(template.paragraph, options));
                    html.push('>');
                }
                Tag::Heading { level, .. } => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    let number = heading_number(level);
                    html.push_str(&format!(
                        "<h{}{}>",
                        number,
                        style_attr(template.heading(number), options)
                    ));
                }
                Tag::BlockQuote { .. } => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    html.push_str("<blockquote");
                    html.push_str(&style_attr(template.blockquote, options));
                    html.push('>');
                }
                Tag::CodeBlock(kind) => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    let language = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .filter(|token| !token.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((language, String::new()));
                }
                Tag::List(start) => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    match start {
                        Some(1) => {
                            html.push_str("<ol");
                            html.push_str(&style_attr(template.ordered_list, options));
                            html.push('>');
                        }
                        Some(first) => {
                            html.push_str(&format!(
                                "<ol start=\"{}\"{}>",
                                first,
                                style_attr(template.ordered_list, options)
                            ));
                        }
                        None => {
                            html.push_str("<ul");
                            html.push_str(&style_attr(template.unordered_list, options));
                            html.push('>');
                        }
                    }
                }
                Tag::Item => {
                    html.push_str("<li");
                    html.push_str(&style_attr(template.list_item, options));
                    html.push('>');
                }
                Tag::Table(_) => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    html.push_str("<table");
                    html.push_str(&style_attr(template.table, options));
                    html.push('>');
                }
                Tag::TableHead => {
                    in_table_head = true;
                    html.push_str("<thead><tr>");
                }
                Tag::TableRow => {
                    html.push_str("<tr>");
                }
                Tag::TableCell => {
                    if in_table_head {
                        html.push_str("<th");
                        html.push_str(&style_attr(template.table_header, options));
                    } else {
                        html.push_str("<td");
                        html.push_str(&style_attr(template.table_cell, options));
                    }
                    html.push('>');
                }
                Tag::HtmlBlock => {
                    if block_depth == 0 {
                        anchors.push(RawAnchor {
                            source_offset: range.start,
                            html_offset: html.len(),
                        });
                    }
                    block_depth += 1;
                    html.push_str("<p");
                    html.push_str(&style_attr(template.paragraph, options));
                    html.push('>');
                }
                Tag::Emphasis => {
                    html.push_str("<em");
                    html.push_str(&style_attr(template.emphasis, options));
                    html.push('>');
                }
                Tag::Strong => {
                    html.push_str("<strong");
                    html.push_str(&style_attr(template.strong, options));
                    html.push('>');
                }
                Tag::Strikethrough => {
                    html.push_str("<del>");
                }
                Tag::Link {
                    dest_url, title, ..
                } => {
                    if image.is_none() {
                        html.push_str(&format!(
                            "<a href=\"{}\"",
                            encode_double_quoted_attribute(&*dest_url)
                        ));
                        if !title.is_empty() {
                            html.push_str(&format!(
                                " title=\"{}\"",
                                encode_double_quoted_attribute(&*title)
                            ));
                        }
                        html.push_str(&style_attr(template.link, options));
                        html.push('>');
                    }
                }
                Tag::Image {
                    dest_url, title, ..
                } => {
                    image = Some(PendingImage {
                        dest: dest_url.to_string(),
                        title: title.to_string(),
                        alt: String::new(),
                    });
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Paragraph => {
                    html.push_str("</p>");
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::Heading(level) => {
                    html.push_str(&format!("</h{}>", heading_number(level)));
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::BlockQuote { .. } => {
                    html.push_str("</blockquote>");
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::CodeBlock => {
                    if let Some((language, code)) = code_block.take() {
                        html.push_str(&highlight_code_block(
                            &code,
                            language.as_deref(),
                            theme,
                            syntaxes,
                            themes,
                            template,
                            options,
                        ));
                        plain.push_str(&code);
                    }
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::List(ordered) => {
                    html.push_str(if ordered { "</ol>" } else { "</ul>" });
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::Item => {
                    html.push_str("</li>");
                    end_plain_block(&mut plain);
                }
                TagEnd::Table => {
                    html.push_str("</tbody></table>");
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::TableHead => {
                    in_table_head = false;
                    html.push_str("</tr></thead><tbody>");
                    end_plain_block(&mut plain);
                }
                TagEnd::TableRow => {
                    html.push_str("</tr>");
                    end_plain_block(&mut plain);
                }
                TagEnd::TableCell => {
                    html.push_str(if in_table_head { "</th>" } else { "</td>" });
                    plain.push(' ');
                }
                TagEnd::HtmlBlock => {
                    html.push_str("</p>");
                    block_depth = block_depth.saturating_sub(1);
                    end_plain_block(&mut plain);
                }
                TagEnd::Emphasis => html.push_str("</em>"),
                TagEnd::Strong => html.push_str("</strong>"),
                TagEnd::Strikethrough => html.push_str("</del>"),
                TagEnd::Link => {
                    if image.is_none() {
                        html.push_str("</a>");
                    }
                }
                TagEnd::Image => {
                    if let Some(pending) = image.take() {
                        html.push_str(&format!(
                            "<img src=\"{}\" alt=\"{}\"",
                            encode_double_quoted_attribute(&pending.dest),
                            encode_double_quoted_attribute(&pending.alt)
                        ));
                        if !pending.title.is_empty() {
                            html.push_str(&format!(
                                " title=\"{}\"",
                                encode_double_quoted_attribute(&pending.title)
                            ));
                        }
                        html.push_str(&style_attr(template.image, options));
                        html.push_str("/>");
                        plain.push_str(&pending.alt);
                    }
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some((_, code)) = code_block.as_mut() {
                    code.push_str(&text);
                } else if let Some(pending) = image.as_mut() {
                    pending.alt.push_str(&text);
                } else {
                    html.push_str(&encode_text(&*text));
                    plain.push_str(&text);
                }
            }
            Event::Code(text) => {
                if let Some(pending) = image.as_mut() {
                    pending.alt.push_str(&text);
                } else {
                    html.push_str("<code");
                    html.push_str(&style_attr(template.inline_code, options));
                    html.push('>');
                    html.push_str(&encode_text(&*text));
                    html.push_str("</code>");
                    plain.push_str(&text);
                }
            }
            // Raw HTML is not trusted by rich-text paste targets; render it
            // as escaped literal text.
            Event::Html(raw) | Event::InlineHtml(raw) => {
                html.push_str(&encode_text(&*raw));
                plain.push_str(&raw);
            }
            Event::SoftBreak => {
                html.push('\n');
                plain.push(' ');
            }
            Event::HardBreak => {
                html.push_str("<br/>");
                plain.push(' ');
            }
            Event::Rule => {
                if block_depth == 0 {
                    anchors.push(RawAnchor {
                        source_offset: range.start,
                        html_offset: html.len(),
                    });
                }
                html.push_str("<hr");
                html.push_str(&style_attr(template.rule, options));
                html.push_str("/>");
            }
            Event::TaskListMarker(checked) => {
                html.push_str(if checked { "\u{2611} " } else { "\u{2610} " });
            }
            _ => {}
        }
    }

    html.push_str("</section>");

    MarkdownOutput {
        html,
        plain_text: plain,
        anchors,
    }
}
