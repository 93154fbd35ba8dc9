// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `SettingsStore` and `RecordStore` for the SQLite [`Database`].

use strongbox_core::{RecordStore, SettingsStore, StrongboxError};

use crate::database::Database;
use crate::models::{CredentialRecord, EntryId, NewRecord, RecordPatch};
use crate::queries;

impl SettingsStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StrongboxError> {
        queries::settings::get_setting(self, key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StrongboxError> {
        queries::settings::put_setting(self, key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StrongboxError> {
        queries::settings::delete_setting(self, key)
    }
}

impl RecordStore for Database {
    fn insert(&self, record: NewRecord) -> Result<EntryId, StrongboxError> {
        queries::credentials::insert_credential(self, &record)
    }

    fn fetch(&self, id: EntryId) -> Result<Option<CredentialRecord>, StrongboxError> {
        queries::credentials::get_credential(self, id)
    }

    fn list(&self, limit: usize) -> Result<Vec<CredentialRecord>, StrongboxError> {
        queries::credentials::list_credentials(self, limit)
    }

    fn update(&self, id: EntryId, patch: RecordPatch) -> Result<bool, StrongboxError> {
        queries::credentials::update_credential(self, id, &patch)
    }

    fn delete(&self, id: EntryId) -> Result<bool, StrongboxError> {
        queries::credentials::delete_credential(self, id)
    }
}
