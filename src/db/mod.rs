//! SQLite persistence for operator preferences.
//!
//! Uses `rusqlite` with bundled SQLite. The console keeps exactly one kind of
//! durable local state: key/value preferences such as the display theme.

mod preferences;

use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use rusqlite::Connection;

/// Manages the SQLite preference database.
pub struct Database {
    conn: Mutex<Connection>,
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS preferences (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at INTEGER NOT NULL
    );
";

impl Database {
    /// Open or create the database at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open preferences at {}", path.display()))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a throwaway in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

/// Current Unix timestamp in seconds.
pub fn unix_timestamp() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn open_memory_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    /// An in-memory database whose preference writes all fail.
    pub fn open_broken_db() -> Database {
        let db = open_memory_db();
        db.conn.lock().unwrap().execute_batch("DROP TABLE preferences").unwrap();
        db
    }

    #[test]
    fn test_open_creates_schema_on_disk() {
        let dir = std::env::temp_dir().join(format!(
            "waf_console_db_test_{}_{}",
            std::process::id(),
            unix_timestamp()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.db");

        {
            let db = Database::open(&path).unwrap();
            db.set_preference("theme", "dark").unwrap();
        }
        let reopened = Database::open(&path).unwrap();
        assert_eq!(reopened.get_preference("theme").unwrap().as_deref(), Some("dark"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unix_timestamp_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(unix_timestamp() > 1_704_067_200);
    }
}
