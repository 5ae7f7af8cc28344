//! Preference table CRUD operations.

use anyhow::Result;
use rusqlite::{params, OptionalExtension};

use super::{unix_timestamp, Database};
use crate::config;
use crate::presentation::Theme;

impl Database {
    /// Read one preference value.
    pub fn get_preference(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().unwrap();
        let value = conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Insert or overwrite one preference value.
    pub fn set_preference(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, unix_timestamp()],
        )?;
        Ok(())
    }

    /// Theme stored at the last toggle; light when never set.
    pub fn load_theme(&self) -> Result<Theme> {
        let stored = self.get_preference(config::THEME_PREFERENCE_KEY)?;
        Ok(Theme::from_preference(stored.as_deref()))
    }

    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.set_preference(config::THEME_PREFERENCE_KEY, theme.as_str())
    }
}
