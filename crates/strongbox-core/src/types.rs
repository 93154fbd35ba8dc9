// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Record types exchanged with the storage collaborators.
//!
//! Everything here is safe to persist in the clear: the only secret-bearing
//! field is `secret_cipher`, which is always an opaque sealed blob.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier assigned to a credential entry by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(pub i64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for EntryId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Observable state of a vault session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Locked,
    Unlocked,
}

/// A credential row as stored by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: EntryId,
    pub title: String,
    pub username: Option<String>,
    /// base64(`nonce ‖ ciphertext ‖ tag`).
    pub secret_cipher: String,
    pub notes: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
    /// Epoch milliseconds, never lower than `created_at`.
    pub updated_at: i64,
}

/// Values for a new credential row. `updated_at` starts equal to `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    pub title: String,
    pub username: Option<String>,
    pub secret_cipher: String,
    pub notes: Option<String>,
    pub created_at: i64,
}

/// A partial update of a credential row.
///
/// `None` leaves a column untouched. For the nullable columns the inner
/// `Option` is the new value, so `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub username: Option<Option<String>>,
    pub secret_cipher: Option<String>,
    pub notes: Option<Option<String>>,
    /// Candidate `updated_at`; stores keep the larger of this and the current value.
    pub updated_at: i64,
}
