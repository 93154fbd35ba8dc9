// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings key-value operations.

use rusqlite::{params, OptionalExtension};
use strongbox_core::StrongboxError;

use crate::database::Database;

/// Get one setting.
pub fn get_setting(db: &Database, key: &str) -> Result<Option<String>, StrongboxError> {
    db.with_conn(|conn| {
        conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()
    })
}

/// Insert or replace one setting. A single statement, so it either lands
/// completely or leaves the previous value in place.
pub fn put_setting(db: &Database, key: &str, value: &str) -> Result<(), StrongboxError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    })
}

/// Delete one setting. Absent keys are ignored.
pub fn delete_setting(db: &Database, key: &str) -> Result<(), StrongboxError> {
    db.with_conn(|conn| {
        conn.execute("DELETE FROM settings WHERE key = ?1", params![key])?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_then_get() {
        let db = Database::open_in_memory().unwrap();
        put_setting(&db, "ui.theme", "dark").unwrap();
        assert_eq!(get_setting(&db, "ui.theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(get_setting(&db, "nope").unwrap().is_none());
    }

    #[test]
    fn put_replaces_existing_value() {
        let db = Database::open_in_memory().unwrap();
        put_setting(&db, "k", "one").unwrap();
        put_setting(&db, "k", "two").unwrap();
        assert_eq!(get_setting(&db, "k").unwrap().as_deref(), Some("two"));
        let rows: i64 = db
            .with_conn(|conn| conn.query_row("SELECT COUNT(*) FROM settings", [], |row| row.get(0)))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn delete_is_idempotent() {
        let db = Database::open_in_memory().unwrap();
        put_setting(&db, "k", "v").unwrap();
        delete_setting(&db, "k").unwrap();
        delete_setting(&db, "k").unwrap();
        assert!(get_setting(&db, "k").unwrap().is_none());
    }
}
