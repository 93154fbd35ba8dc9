// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential row CRUD.
//!
//! Each function is one SQL statement, so every mutation is atomic.

use rusqlite::{params, OptionalExtension, Row};
use strongbox_core::StrongboxError;

use crate::database::Database;
use crate::models::{CredentialRecord, EntryId, NewRecord, RecordPatch};

const SELECT_COLUMNS: &str =
    "SELECT id, title, username, password_cipher, notes, created_at, updated_at FROM credentials";

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<CredentialRecord> {
    Ok(CredentialRecord {
        id: EntryId(row.get(0)?),
        title: row.get(1)?,
        username: row.get(2)?,
        secret_cipher: row.get(3)?,
        notes: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

/// Insert a credential row and return its id.
pub fn insert_credential(db: &Database, record: &NewRecord) -> Result<EntryId, StrongboxError> {
    db.with_conn(|conn| {
        conn.execute(
            "INSERT INTO credentials
                 (title, username, password_cipher, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            params![
                record.title,
                record.username,
                record.secret_cipher,
                record.notes,
                record.created_at,
            ],
        )?;
        Ok(EntryId(conn.last_insert_rowid()))
    })
}

/// Get a credential row by id.
pub fn get_credential(
    db: &Database,
    id: EntryId,
) -> Result<Option<CredentialRecord>, StrongboxError> {
    db.with_conn(|conn| {
        conn.query_row(
            &format!("{SELECT_COLUMNS} WHERE id = ?1"),
            params![id.0],
            row_to_record,
        )
        .optional()
    })
}

/// List up to `limit` rows in ascending id order.
pub fn list_credentials(
    db: &Database,
    limit: usize,
) -> Result<Vec<CredentialRecord>, StrongboxError> {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    db.with_conn(|conn| {
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id LIMIT ?1"))?;
        let rows = stmt.query_map(params![limit], row_to_record)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    })
}

/// Apply a partial update. Returns `false` when no row has this id.
///
/// `updated_at` only moves forward: the stored value becomes
/// `MAX(updated_at, patch.updated_at)`.
pub fn update_credential(
    db: &Database,
    id: EntryId,
    patch: &RecordPatch,
) -> Result<bool, StrongboxError> {
    let set_username = patch.username.is_some();
    let username = patch.username.clone().flatten();
    let set_notes = patch.notes.is_some();
    let notes = patch.notes.clone().flatten();

    db.with_conn(|conn| {
        let changed = conn.execute(
            "UPDATE credentials SET
                 title           = COALESCE(?1, title),
                 username        = CASE WHEN ?2 THEN ?3 ELSE username END,
                 password_cipher = COALESCE(?4, password_cipher),
                 notes           = CASE WHEN ?5 THEN ?6 ELSE notes END,
                 updated_at      = MAX(updated_at, ?7)
             WHERE id = ?8",
            params![
                patch.title,
                set_username,
                username,
                patch.secret_cipher,
                set_notes,
                notes,
                patch.updated_at,
                id.0,
            ],
        )?;
        Ok(changed > 0)
    })
}

/// Delete a row. Returns `false` when no row had this id.
pub fn delete_credential(db: &Database, id: EntryId) -> Result<bool, StrongboxError> {
    db.with_conn(|conn| {
        let changed = conn.execute("DELETE FROM credentials WHERE id = ?1", params![id.0])?;
        Ok(changed > 0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(title: &str, at: i64) -> NewRecord {
        NewRecord {
            title: title.to_string(),
            username: Some("alice".to_string()),
            secret_cipher: "Y2lwaGVy".to_string(),
            notes: None,
            created_at: at,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let db = Database::open_in_memory().unwrap();
        let a = insert_credential(&db, &new_record("a", 1)).unwrap();
        let b = insert_credential(&db, &new_record("b", 2)).unwrap();
        assert_eq!(a, EntryId(1));
        assert_eq!(b, EntryId(2));
    }

    #[test]
    fn insert_sets_both_timestamps() {
        let db = Database::open_in_memory().unwrap();
        let id = insert_credential(&db, &new_record("bank", 1_000)).unwrap();
        let row = get_credential(&db, id).unwrap().unwrap();
        assert_eq!(row.created_at, 1_000);
        assert_eq!(row.updated_at, 1_000);
        assert_eq!(row.title, "bank");
        assert_eq!(row.username.as_deref(), Some("alice"));
    }

    #[test]
    fn get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(get_credential(&db, EntryId(99)).unwrap().is_none());
    }

    #[test]
    fn list_respects_limit_and_order() {
        let db = Database::open_in_memory().unwrap();
        for i in 0..5 {
            insert_credential(&db, &new_record(&format!("e{i}"), i)).unwrap();
        }
        let rows = list_credentials(&db, 3).unwrap();
        let titles: Vec<_> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["e0", "e1", "e2"]);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let db = Database::open_in_memory().unwrap();
        let id = insert_credential(&db, &new_record("old", 10)).unwrap();

        let patch = RecordPatch {
            title: Some("new".to_string()),
            updated_at: 20,
            ..RecordPatch::default()
        };
        assert!(update_credential(&db, id, &patch).unwrap());

        let row = get_credential(&db, id).unwrap().unwrap();
        assert_eq!(row.title, "new");
        assert_eq!(row.username.as_deref(), Some("alice"));
        assert_eq!(row.secret_cipher, "Y2lwaGVy");
        assert_eq!(row.updated_at, 20);
        assert_eq!(row.created_at, 10);
    }

    #[test]
    fn update_can_clear_nullable_columns() {
        let db = Database::open_in_memory().unwrap();
        let id = insert_credential(&db, &new_record("x", 10)).unwrap();

        let patch = RecordPatch {
            username: Some(None),
            notes: Some(Some("memo".to_string())),
            updated_at: 11,
            ..RecordPatch::default()
        };
        update_credential(&db, id, &patch).unwrap();

        let row = get_credential(&db, id).unwrap().unwrap();
        assert_eq!(row.username, None);
        assert_eq!(row.notes.as_deref(), Some("memo"));
    }

    #[test]
    fn update_never_moves_updated_at_backwards() {
        let db = Database::open_in_memory().unwrap();
        let id = insert_credential(&db, &new_record("x", 500)).unwrap();

        let patch = RecordPatch {
            title: Some("y".to_string()),
            updated_at: 100,
            ..RecordPatch::default()
        };
        update_credential(&db, id, &patch).unwrap();

        let row = get_credential(&db, id).unwrap().unwrap();
        assert_eq!(row.updated_at, 500);
        assert_eq!(row.title, "y");
    }

    #[test]
    fn update_missing_returns_false() {
        let db = Database::open_in_memory().unwrap();
        let patch = RecordPatch {
            updated_at: 1,
            ..RecordPatch::default()
        };
        assert!(!update_credential(&db, EntryId(7), &patch).unwrap());
    }

    #[test]
    fn delete_reports_presence() {
        let db = Database::open_in_memory().unwrap();
        let id = insert_credential(&db, &new_record("x", 1)).unwrap();
        assert!(delete_credential(&db, id).unwrap());
        assert!(!delete_credential(&db, id).unwrap());
        assert!(get_credential(&db, id).unwrap().is_none());
    }
}
