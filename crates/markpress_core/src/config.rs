//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_AUTO_SAVE_INTERVAL_MS, DEFAULT_CODE_THEME_ID, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_SERVER_URL, DEFAULT_TEMPLATE_ID,
};
use serde::Deserialize;
use std::env;

/// Runtime configuration for Markpress.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server_url: String,
    pub auto_save_interval: u64,
    pub request_timeout_secs: u64,
    pub template_id: String,
    pub code_theme_id: String,
}

fn trimmed_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn strip_trailing_slashes(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            server_url: trimmed_env("MARKPRESS_SERVER")
                .map(strip_trailing_slashes)
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            auto_save_interval: env::var("AUTO_SAVE_INTERVAL")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_AUTO_SAVE_INTERVAL_MS),
            request_timeout_secs: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            template_id: trimmed_env("MARKPRESS_TEMPLATE")
                .unwrap_or_else(|| DEFAULT_TEMPLATE_ID.to_string()),
            code_theme_id: trimmed_env("MARKPRESS_CODE_THEME")
                .unwrap_or_else(|| DEFAULT_CODE_THEME_ID.to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            auto_save_interval: DEFAULT_AUTO_SAVE_INTERVAL_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            code_theme_id: DEFAULT_CODE_THEME_ID.to_string(),
        }
    }
}
