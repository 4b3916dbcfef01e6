//! `SQLite`-backed implementation of [`CursorStore`].
//!
//! Uses a single `Mutex<Connection>` for thread safety.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDateTime, Utc};
use rusqlite::Connection;
use vigil_types::{Cursor, CursorRecord, EvalStats, EvalStatus, SensorName};

use crate::error::{self, StateError};
use crate::store::CursorStore;

/// `SQLite` datetime format (UTC, no timezone suffix).
const SQLITE_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

/// Idempotent DDL for state tables.
const CREATE_TABLES: &str = r"
CREATE TABLE IF NOT EXISTS sensor_cursors (
    sensor TEXT PRIMARY KEY,
    cursor_value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS sensor_evals (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sensor TEXT NOT NULL,
    status TEXT NOT NULL,
    started_at TEXT NOT NULL DEFAULT (datetime('now')),
    finished_at TEXT,
    events_emitted INTEGER DEFAULT 0,
    cursor_value TEXT,
    error_message TEXT
);

CREATE INDEX IF NOT EXISTS idx_evals_sensor ON sensor_evals (sensor, id);
";

/// `SQLite`-backed cursor storage.
///
/// Create with [`SqliteCursorStore::open`] for file-backed persistence
/// or [`SqliteCursorStore::in_memory`] for tests.
pub struct SqliteCursorStore {
    conn: Mutex<Connection>,
}

impl SqliteCursorStore {
    /// Open or create a `SQLite` state database at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Io`] if the directory can't be created,
    /// or [`StateError::Sqlite`] if the database can't be opened.
    pub fn open(path: &Path) -> error::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory `SQLite` store (for testing).
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Sqlite`] if the in-memory database can't be
    /// initialized.
    pub fn in_memory() -> error::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(CREATE_TABLES)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the connection lock.
    fn lock_conn(&self) -> error::Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StateError::LockPoisoned)
    }

    /// Convert a `SQLite` datetime string to ISO-8601.
    fn sqlite_to_iso8601(raw: &str) -> String {
        NaiveDateTime::parse_from_str(raw, SQLITE_DATETIME_FMT).map_or_else(
            |_| raw.to_string(),
            |ndt| format!("{}Z", ndt.format("%Y-%m-%dT%H:%M:%S")),
        )
    }

    /// Format current UTC time for `SQLite` storage.
    fn now_sqlite() -> String {
        Utc::now().format(SQLITE_DATETIME_FMT).to_string()
    }

    #[cfg(test)]
    fn get_eval_row(
        &self,
        eval_id: i64,
    ) -> error::Result<(String, i64, Option<String>, Option<String>)> {
        let conn = self.lock_conn()?;
        conn.query_row(
            "SELECT status, events_emitted, finished_at, error_message \
             FROM sensor_evals WHERE id = ?1",
            [eval_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
        )
        .map_err(StateError::Sqlite)
    }
}

impl CursorStore for SqliteCursorStore {
    fn get_cursor(&self, sensor: &SensorName) -> error::Result<Option<CursorRecord>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT cursor_value, updated_at FROM sensor_cursors WHERE sensor = ?1",
        )?;

        let result = stmt.query_row([sensor.as_str()], |row| {
            let cursor_value: String = row.get(0)?;
            let updated_at: String = row.get(1)?;
            Ok((cursor_value, updated_at))
        });

        match result {
            Ok((cursor_value, updated_at)) => Ok(Some(CursorRecord {
                cursor: Cursor::new(cursor_value),
                updated_at: Self::sqlite_to_iso8601(&updated_at),
            })),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StateError::Sqlite(e)),
        }
    }

    fn set_cursor(&self, sensor: &SensorName, cursor: &Cursor) -> error::Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO sensor_cursors (sensor, cursor_value, updated_at) \
             VALUES (?1, ?2, ?3) \
             ON CONFLICT(sensor) DO UPDATE SET cursor_value = ?2, updated_at = ?3",
            rusqlite::params![sensor.as_str(), cursor.as_str(), Self::now_sqlite()],
        )?;
        Ok(())
    }

    fn start_eval(&self, sensor: &SensorName) -> error::Result<i64> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO sensor_evals (sensor, status) VALUES (?1, ?2)",
            rusqlite::params![sensor.as_str(), EvalStatus::Running.as_str()],
        )?;
        Ok(conn.last_insert_rowid())
    }

    #[allow(clippy::cast_possible_wrap)]
    fn complete_eval(
        &self,
        eval_id: i64,
        status: EvalStatus,
        stats: &EvalStats,
    ) -> error::Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "UPDATE sensor_evals SET status = ?1, finished_at = datetime('now'), \
             events_emitted = ?2, cursor_value = ?3, error_message = ?4 \
             WHERE id = ?5",
            rusqlite::params![
                status.as_str(),
                stats.events_emitted as i64,
                stats.cursor.as_ref().map(Cursor::as_str),
                stats.error_message,
                eval_id,
            ],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sensor(name: &str) -> SensorName {
        SensorName::new(name)
    }

    #[test]
    fn cursor_roundtrip() {
        let store = SqliteCursorStore::in_memory().unwrap();
        assert!(store.get_cursor(&sensor("s")).unwrap().is_none());

        store.set_cursor(&sensor("s"), &Cursor::new("100")).unwrap();

        let record = store.get_cursor(&sensor("s")).unwrap().unwrap();
        assert_eq!(record.cursor, Cursor::new("100"));
        assert!(!record.updated_at.is_empty());
    }

    #[test]
    fn cursor_upsert_replaces_value() {
        let store = SqliteCursorStore::in_memory().unwrap();
        store.set_cursor(&sensor("s"), &Cursor::new("100")).unwrap();
        store.set_cursor(&sensor("s"), &Cursor::new("150")).unwrap();

        let record = store.get_cursor(&sensor("s")).unwrap().unwrap();
        assert_eq!(record.cursor, Cursor::new("150"));
    }

    #[test]
    fn sensors_are_independent() {
        let store = SqliteCursorStore::in_memory().unwrap();
        store.set_cursor(&sensor("a"), &Cursor::new("aaa")).unwrap();
        store.set_cursor(&sensor("b"), &Cursor::new("bbb")).unwrap();

        let a = store.get_cursor(&sensor("a")).unwrap().unwrap();
        let b = store.get_cursor(&sensor("b")).unwrap().unwrap();
        assert_eq!(a.cursor, Cursor::new("aaa"));
        assert_eq!(b.cursor, Cursor::new("bbb"));
    }

    #[test]
    fn eval_lifecycle() {
        let store = SqliteCursorStore::in_memory().unwrap();
        let eval_id = store.start_eval(&sensor("s")).unwrap();
        assert!(eval_id > 0);

        store
            .complete_eval(
                eval_id,
                EvalStatus::Emitted,
                &EvalStats {
                    events_emitted: 1,
                    cursor: Some(Cursor::new("100")),
                    error_message: None,
                },
            )
            .unwrap();

        let (status, events, finished, _error) = store.get_eval_row(eval_id).unwrap();
        assert_eq!(status, "emitted");
        assert_eq!(events, 1);
        assert!(finished.is_some());
    }

    #[test]
    fn eval_failure_records_message() {
        let store = SqliteCursorStore::in_memory().unwrap();
        let eval_id = store.start_eval(&sensor("s")).unwrap();

        store
            .complete_eval(
                eval_id,
                EvalStatus::Failed,
                &EvalStats {
                    events_emitted: 0,
                    cursor: None,
                    error_message: Some("probe unreachable".into()),
                },
            )
            .unwrap();

        let (status, _events, _finished, error) = store.get_eval_row(eval_id).unwrap();
        assert_eq!(status, "failed");
        assert_eq!(error, Some("probe unreachable".into()));
    }

    #[test]
    fn eval_ids_are_monotonic() {
        let store = SqliteCursorStore::in_memory().unwrap();
        let first = store.start_eval(&sensor("s")).unwrap();
        let second = store.start_eval(&sensor("s")).unwrap();
        assert!(second > first);
    }

    #[test]
    fn open_creates_parent_dirs_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/state.db");

        {
            let store = SqliteCursorStore::open(&path).unwrap();
            store.set_cursor(&sensor("s"), &Cursor::new("42")).unwrap();
        }

        // Cursor survives a process restart.
        let store = SqliteCursorStore::open(&path).unwrap();
        let record = store.get_cursor(&sensor("s")).unwrap().unwrap();
        assert_eq!(record.cursor, Cursor::new("42"));
    }

    #[test]
    fn sqlite_to_iso8601_conversion() {
        let iso = SqliteCursorStore::sqlite_to_iso8601("2024-01-15 10:00:00");
        assert_eq!(iso, "2024-01-15T10:00:00Z");
    }
}
