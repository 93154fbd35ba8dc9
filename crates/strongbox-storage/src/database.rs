// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! A single `rusqlite::Connection` sits behind a mutex, so every statement is
//! serialized and runs on the caller's thread. No background worker is started.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::Connection;
use strongbox_config::model::StorageConfig;
use strongbox_core::StrongboxError;
use tracing::debug;

use crate::migrations;

/// An open, migrated SQLite database.
pub struct Database {
    conn: Mutex<Connection>,
    path: String,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}

impl Database {
    /// Open (creating if needed) the database at `path` with WAL enabled.
    pub fn open(path: &str) -> Result<Self, StrongboxError> {
        Self::open_with(path, true)
    }

    /// Open the database described by the storage config section.
    pub fn open_with_config(config: &StorageConfig) -> Result<Self, StrongboxError> {
        Self::open_with(&config.database_path, config.wal_mode)
    }

    /// Open a private in-memory database. Contents vanish on drop.
    pub fn open_in_memory() -> Result<Self, StrongboxError> {
        let conn = Connection::open_in_memory().map_err(map_sql_err)?;
        Self::init(conn, ":memory:".to_string(), false)
    }

    fn open_with(path: &str, wal_mode: bool) -> Result<Self, StrongboxError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(StrongboxError::storage)?;
            }
        }
        let conn = Connection::open(path).map_err(map_sql_err)?;
        Self::init(conn, path.to_string(), wal_mode)
    }

    fn init(mut conn: Connection, path: String, wal_mode: bool) -> Result<Self, StrongboxError> {
        if wal_mode {
            let _mode: String = conn
                .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
                .map_err(map_sql_err)?;
        }
        conn.busy_timeout(Duration::from_secs(5))
            .map_err(map_sql_err)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(map_sql_err)?;

        migrations::run_migrations(&mut conn)?;
        debug!(path = %path, wal_mode, "database opened and migrated");

        Ok(Self {
            conn: Mutex::new(conn),
            path,
        })
    }

    /// Path the database was opened from (`:memory:` for in-memory databases).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Run `f` with exclusive access to the connection.
    ///
    /// A poisoned mutex is recovered: a panic inside an earlier closure cannot
    /// leave a half-applied statement behind, since SQLite rolls back any
    /// transaction that was not committed.
    pub fn with_conn<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StrongboxError> {
        let mut guard = self.lock_conn();
        f(&mut guard).map_err(map_sql_err)
    }

    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Checkpoint the WAL and close the connection.
    pub fn close(self) -> Result<(), StrongboxError> {
        let conn = self
            .conn
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
            .map_err(map_sql_err)?;
        conn.close().map_err(|(_, e)| map_sql_err(e))?;
        debug!(path = %self.path, "database closed");
        Ok(())
    }
}

/// Convert rusqlite errors to `StrongboxError::Storage`.
pub fn map_sql_err(e: rusqlite::Error) -> StrongboxError {
    StrongboxError::storage(e)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_creates_file_and_parent_dirs() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested").join("vault.db");

        let db = Database::open(db_path.to_str().unwrap()).unwrap();
        assert!(db_path.exists());
        assert_eq!(db.path(), db_path.to_str().unwrap());
        db.close().unwrap();
    }

    #[test]
    fn migrations_create_both_tables() {
        let db = Database::open_in_memory().unwrap();
        let tables: Vec<String> = db
            .with_conn(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT name FROM sqlite_master
                     WHERE type = 'table' AND name IN ('settings', 'credentials')
                     ORDER BY name",
                )?;
                let rows = stmt.query_map([], |row| row.get(0))?;
                rows.collect()
            })
            .unwrap();
        assert_eq!(tables, vec!["credentials", "settings"]);
    }

    #[test]
    fn reopen_runs_migrations_idempotently() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");
        let path = db_path.to_str().unwrap();

        Database::open(path).unwrap().close().unwrap();
        let db = Database::open(path).unwrap();
        db.close().unwrap();
    }

    #[test]
    fn open_with_config_honours_wal_flag() {
        let dir = tempdir().unwrap();
        let config = StorageConfig {
            database_path: dir.path().join("nowal.db").to_string_lossy().into_owned(),
            wal_mode: false,
        };
        let db = Database::open_with_config(&config).unwrap();
        let mode: String = db
            .with_conn(|conn| conn.query_row("PRAGMA journal_mode", [], |row| row.get(0)))
            .unwrap();
        assert_ne!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn sql_errors_map_to_storage() {
        let db = Database::open_in_memory().unwrap();
        let err = db
            .with_conn(|conn| conn.execute("SELECT * FROM no_such_table", []))
            .unwrap_err();
        assert!(matches!(err, StrongboxError::Storage { .. }));
    }
}
