//! Centralized runtime constants and settings for the console.
//!
//! All tunable intervals and names are collected here so they can be found and
//! adjusted in a single place rather than scattered across modules.

use std::path::PathBuf;

/// Delay between the end of one log refresh and the start of the next (milliseconds).
pub const LOG_POLL_DELAY_MS: u64 = 5000;

/// Interval at which the secondary request counter is refreshed (seconds).
pub const REQUEST_COUNT_INTERVAL_SECS: u64 = 5;

/// Management API base used when `WAF_CONSOLE_API` is not set.
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8081";

/// SQLite file holding operator preferences, relative to the data directory.
pub const PREFERENCES_DB_FILE: &str = "waf-console.db";

/// Preference key under which the theme is persisted.
pub const THEME_PREFERENCE_KEY: &str = "theme";

/// Environment variable overriding the management API base URL.
pub const API_BASE_ENV: &str = "WAF_CONSOLE_API";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "WAF_CONSOLE_DATA_DIR";

/// Request bodies longer than this are truncated in the console log table.
pub const LOG_BODY_PREVIEW_CHARS: usize = 40;

/// Settings resolved once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleSettings {
    pub api_base: String,
    pub data_dir: PathBuf,
}

impl ConsoleSettings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup(API_BASE_ENV)
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let data_dir = lookup(DATA_DIR_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        Self { api_base, data_dir }
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir.join(PREFERENCES_DB_FILE)
    }
}
