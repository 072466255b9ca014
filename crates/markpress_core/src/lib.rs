//! Core domain library for Markpress (config, models, rendering, scroll sync).

/// Configuration loading and defaults.
pub mod config;
/// Shared constants across Markpress crates.
pub mod constants;
/// Data models for documents and API payloads.
pub mod models;
/// Markdown-to-styled-HTML render pipeline.
pub mod render;
/// Source/preview scroll position mapping.
pub mod scroll;

pub use config::Config;
pub use constants::{
    DEFAULT_AUTO_SAVE_INTERVAL_MS, DEFAULT_CODE_THEME_ID, DEFAULT_SERVER_URL, DEFAULT_TEMPLATE_ID,
    DEFAULT_TITLE,
};
pub use render::{RenderInput, RenderPipeline, RenderedArtifact, StyleOptions};
pub use scroll::{Pane, ScrollMapping, ScrollSynchronizer};
