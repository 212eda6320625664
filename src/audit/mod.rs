//! Operation history — SQLite-based log of encrypt/decrypt runs.
//!
//! Stores a record of every completed (or failed) operation in a local
//! SQLite database under the user's data directory.
//!
//! Designed for graceful degradation: if the database can't be opened or
//! written to, operations silently continue without logging.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::Connection;

use crate::errors::{Result, SkitaError};

/// A single history entry.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub operation: String,
    pub file_name: String,
    pub outcome: String,
}

/// SQLite-backed operation history.
pub struct History {
    conn: Connection,
}

impl History {
    /// Open (or create) the history database at its default location,
    /// `<user data dir>/skita/history.db`.
    ///
    /// Returns `None` if the directory or database can't be opened —
    /// callers should treat this as "history unavailable" and continue
    /// normally.
    pub fn open_default() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "skita")?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).ok()?;
        Self::open(data_dir)
    }

    /// Open (or create) the history database inside `dir`.
    pub fn open(dir: &Path) -> Option<Self> {
        let conn = Connection::open(Self::db_path(dir)).ok()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS history (
                id        INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                operation TEXT NOT NULL,
                file_name TEXT NOT NULL,
                outcome   TEXT NOT NULL
            );",
        )
        .ok()?;

        Some(Self { conn })
    }

    /// Record an operation. Fire-and-forget — errors are silently ignored.
    pub fn log(&self, operation: &str, file_name: &str, outcome: &str) {
        let now = Utc::now().to_rfc3339();
        let _ = self.conn.execute(
            "INSERT INTO history (timestamp, operation, file_name, outcome)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![now, operation, file_name, outcome],
        );
    }

    /// Query recent entries, most recent first.
    pub fn query(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let limit_i64 = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, timestamp, operation, file_name, outcome
                 FROM history
                 ORDER BY id DESC
                 LIMIT ?1",
            )
            .map_err(|e| SkitaError::HistoryError(format!("query prepare: {e}")))?;

        let rows = stmt
            .query_map([limit_i64], |row| {
                let ts_str: String = row.get(1)?;
                let timestamp = DateTime::parse_from_rfc3339(&ts_str)
                    .map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc));

                Ok(HistoryEntry {
                    id: row.get(0)?,
                    timestamp,
                    operation: row.get(2)?,
                    file_name: row.get(3)?,
                    outcome: row.get(4)?,
                })
            })
            .map_err(|e| SkitaError::HistoryError(format!("query exec: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| SkitaError::HistoryError(format!("row parse: {e}")))?);
        }

        Ok(entries)
    }

    /// Return the path to the history database inside `dir`.
    pub fn db_path(dir: &Path) -> PathBuf {
        dir.join("history.db")
    }
}

/// Convenience helper: log an operation to the default history database.
///
/// Opens the database, logs the event, and silently ignores any errors.
/// This is safe to call from any command — it never fails the parent
/// operation.
pub fn log_operation(operation: &str, file_name: &str, outcome: &str) {
    if let Some(history) = History::open_default() {
        history.log(operation, file_name, outcome);
    }
}
