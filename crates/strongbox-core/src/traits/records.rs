// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential record store.

use crate::error::StrongboxError;
use crate::types::{CredentialRecord, EntryId, NewRecord, RecordPatch};

/// CRUD over credential rows keyed by a store-assigned numeric id.
///
/// The store never sees plaintext secrets; `secret_cipher` is opaque to it.
pub trait RecordStore: Send + Sync {
    /// Inserts a row and returns its newly assigned id.
    fn insert(&self, record: NewRecord) -> Result<EntryId, StrongboxError>;

    /// Fetches one row.
    fn fetch(&self, id: EntryId) -> Result<Option<CredentialRecord>, StrongboxError>;

    /// Lists up to `limit` rows in ascending id order.
    fn list(&self, limit: usize) -> Result<Vec<CredentialRecord>, StrongboxError>;

    /// Applies `patch` to the row. Returns `false` if the row does not exist.
    fn update(&self, id: EntryId, patch: RecordPatch) -> Result<bool, StrongboxError>;

    /// Deletes the row. Returns `false` if the row did not exist.
    fn delete(&self, id: EntryId) -> Result<bool, StrongboxError>;
}
