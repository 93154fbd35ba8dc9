// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential CRUD on top of a [`RecordStore`].
//!
//! Titles, usernames, notes and timestamps are stored in the clear. The secret
//! is sealed through the [`VaultSession`] before it reaches the store and
//! opened again on [`CredentialStore::get`].

use std::sync::Arc;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use strongbox_core::{CredentialRecord, EntryId, NewRecord, RecordPatch, RecordStore, StrongboxError};
use tracing::debug;

use crate::session::VaultSession;

/// Stand-in for the secret in metadata listings.
pub const REDACTED: &str = "<redacted>";

/// Input for [`CredentialStore::create`].
#[derive(Debug)]
pub struct NewCredential {
    pub title: String,
    pub username: Option<String>,
    pub secret: SecretString,
    pub notes: Option<String>,
}

/// Partial update. `None` leaves a field alone; for the optional columns
/// `Some(None)` clears the value.
#[derive(Debug, Default)]
pub struct CredentialUpdate {
    pub title: Option<String>,
    pub username: Option<Option<String>>,
    pub secret: Option<SecretString>,
    pub notes: Option<Option<String>>,
}

/// A decrypted credential.
#[derive(Debug)]
pub struct CredentialEntry {
    pub id: EntryId,
    pub title: String,
    pub username: Option<String>,
    pub secret: SecretString,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A credential as listed without the key; `secret` is always [`REDACTED`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialSummary {
    pub id: EntryId,
    pub title: String,
    pub username: Option<String>,
    pub secret: &'static str,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<CredentialRecord> for CredentialSummary {
    fn from(record: CredentialRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            username: record.username,
            secret: REDACTED,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

pub struct CredentialStore {
    records: Arc<dyn RecordStore>,
    session: Arc<VaultSession>,
    list_limit: usize,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("session", &self.session)
            .field("list_limit", &self.list_limit)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    pub fn new(
        records: Arc<dyn RecordStore>,
        session: Arc<VaultSession>,
        list_limit: usize,
    ) -> Self {
        Self {
            records,
            session,
            list_limit,
        }
    }

    pub fn session(&self) -> &Arc<VaultSession> {
        &self.session
    }

    /// Seal the secret and persist a new entry. Returns its id.
    pub fn create(&self, new: NewCredential) -> Result<EntryId, StrongboxError> {
        let secret_cipher = self
            .session
            .encrypt_with_session(new.secret.expose_secret().as_bytes())?;

        let id = self.records.insert(NewRecord {
            title: new.title,
            username: new.username,
            secret_cipher,
            notes: new.notes,
            created_at: now_millis(),
        })?;

        debug!(id = %id, "credential created");
        Ok(id)
    }

    /// Fetch one entry with its secret decrypted.
    pub fn get(&self, id: EntryId) -> Result<CredentialEntry, StrongboxError> {
        self.ensure_unlocked()?;
        let record = self
            .records
            .fetch(id)?
            .ok_or(StrongboxError::NotFound { id })?;

        let plaintext = self.session.decrypt_with_session(&record.secret_cipher)?;
        let secret = std::str::from_utf8(&plaintext)
            .map_err(|_| StrongboxError::Internal(format!("secret of entry {id} is not UTF-8")))?;

        debug!(id = %id, "credential read");
        Ok(CredentialEntry {
            id: record.id,
            title: record.title,
            username: record.username,
            secret: SecretString::from(secret.to_owned()),
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }

    /// List entries without decrypting anything. Works while locked.
    ///
    /// Holds the session's read lock for the duration, so a listing never
    /// overlaps a lock or unlock.
    pub fn list_metadata(&self) -> Result<Vec<CredentialSummary>, StrongboxError> {
        let _guard = self.session.read_state();
        let records = self.records.list(self.list_limit)?;
        Ok(records.into_iter().map(CredentialSummary::from).collect())
    }

    /// Apply `update` to entry `id`, re-sealing the secret if one is given.
    pub fn update(&self, id: EntryId, update: CredentialUpdate) -> Result<(), StrongboxError> {
        self.ensure_unlocked()?;

        let secret_cipher = match &update.secret {
            Some(secret) => Some(
                self.session
                    .encrypt_with_session(secret.expose_secret().as_bytes())?,
            ),
            None => None,
        };

        let patch = RecordPatch {
            title: update.title,
            username: update.username,
            secret_cipher,
            notes: update.notes,
            updated_at: now_millis(),
        };
        if !self.records.update(id, patch)? {
            return Err(StrongboxError::NotFound { id });
        }

        debug!(id = %id, "credential updated");
        Ok(())
    }

    /// Remove entry `id`. Unknown ids are ignored.
    pub fn delete(&self, id: EntryId) -> Result<(), StrongboxError> {
        self.ensure_unlocked()?;
        let removed = self.records.delete(id)?;
        debug!(id = %id, removed, "credential deleted");
        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<(), StrongboxError> {
        if self.session.is_unlocked() {
            Ok(())
        } else {
            Err(StrongboxError::SessionLocked)
        }
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
