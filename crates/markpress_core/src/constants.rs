//! Shared constants used across Markpress crates.

/// Default base URL for the remote article API.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/api";

/// Default autosave debounce window in milliseconds.
pub const DEFAULT_AUTO_SAVE_INTERVAL_MS: u64 = 2_000;

/// Default HTTP request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Title used for documents the user has not named yet.
pub const DEFAULT_TITLE: &str = "Untitled Article";

/// Built-in template applied when none is selected.
pub const DEFAULT_TEMPLATE_ID: &str = "default";

/// Built-in code theme applied when none is selected.
pub const DEFAULT_CODE_THEME_ID: &str = "github";

/// Reading speed used to estimate reading time, in words per minute.
pub const READING_SPEED_WPM: usize = 300;
