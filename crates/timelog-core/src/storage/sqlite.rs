//! SQLite-backed key-value store.
//!
//! A single `kv` table holds one row per key. Each `set` is a single
//! upsert statement, so a failed write never leaves a half-written value.

use std::fs;
use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, TimelogError};
use crate::storage::traits::KeyValueStore;

/// Key-value store in a SQLite database file.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Connection,
    quota_bytes: Option<usize>,
}

impl SqliteStore {
    const SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );
    "#;

    /// Open (creating if needed) the database at `path`.
    ///
    /// # Errors
    ///
    /// Returns `TimelogError::Storage` if the parent directory cannot be
    /// created or the file is not a SQLite database.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self {
            path: Some(path.to_path_buf()),
            conn,
            quota_bytes: None,
        })
    }

    /// A throwaway database that lives only as long as this value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(Self::SCHEMA)?;
        Ok(Self {
            path: None,
            conn,
            quota_bytes: None,
        })
    }

    /// Reject any single value larger than `quota_bytes`.
    pub fn with_quota(mut self, quota_bytes: Option<usize>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Database file path, if on disk.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota_bytes {
            if value.len() > quota {
                return Err(TimelogError::Storage(format!(
                    "Quota exceeded for {} ({} > {} bytes)",
                    key,
                    value.len(),
                    quota
                )));
            }
        }
        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }
}
