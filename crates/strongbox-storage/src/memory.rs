// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Volatile collaborators backed by `BTreeMap`s.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use strongbox_core::{RecordStore, SettingsStore, StrongboxError};

use crate::models::{CredentialRecord, EntryId, NewRecord, RecordPatch};

/// In-memory [`SettingsStore`].
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, key: &str) -> Result<Option<String>, StrongboxError> {
        Ok(self.values().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StrongboxError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StrongboxError> {
        self.values().remove(key);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordTable {
    next_id: i64,
    rows: BTreeMap<EntryId, CredentialRecord>,
}

/// In-memory [`RecordStore`] with the same id and timestamp rules as SQLite.
#[derive(Debug, Default)]
pub struct MemoryRecords {
    table: Mutex<RecordTable>,
}

impl MemoryRecords {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> MutexGuard<'_, RecordTable> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryRecords {
    fn insert(&self, record: NewRecord) -> Result<EntryId, StrongboxError> {
        let mut table = self.table();
        table.next_id += 1;
        let id = EntryId(table.next_id);
        table.rows.insert(
            id,
            CredentialRecord {
                id,
                title: record.title,
                username: record.username,
                secret_cipher: record.secret_cipher,
                notes: record.notes,
                created_at: record.created_at,
                updated_at: record.created_at,
            },
        );
        Ok(id)
    }

    fn fetch(&self, id: EntryId) -> Result<Option<CredentialRecord>, StrongboxError> {
        Ok(self.table().rows.get(&id).cloned())
    }

    fn list(&self, limit: usize) -> Result<Vec<CredentialRecord>, StrongboxError> {
        Ok(self.table().rows.values().take(limit).cloned().collect())
    }

    fn update(&self, id: EntryId, patch: RecordPatch) -> Result<bool, StrongboxError> {
        let mut table = self.table();
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(username) = patch.username {
            row.username = username;
        }
        if let Some(cipher) = patch.secret_cipher {
            row.secret_cipher = cipher;
        }
        if let Some(notes) = patch.notes {
            row.notes = notes;
        }
        row.updated_at = row.updated_at.max(patch.updated_at);
        Ok(true)
    }

    fn delete(&self, id: EntryId) -> Result<bool, StrongboxError> {
        Ok(self.table().rows.remove(&id).is_some())
    }
}
