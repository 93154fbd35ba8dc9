// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Strongbox vault.

use thiserror::Error;

use crate::types::EntryId;

/// The error type returned by every vault, credential, and storage operation.
///
/// Messages never carry key material, passwords, or secret values.
#[derive(Debug, Error)]
pub enum StrongboxError {
    /// Wrong password, or tampered/corrupted ciphertext. The two causes are
    /// deliberately reported the same way.
    #[error("authentication failed: wrong password or corrupted data")]
    AuthenticationFailure,

    /// The operation needs an unlocked session and none is active.
    #[error("vault is locked")]
    SessionLocked,

    /// The referenced credential entry does not exist.
    #[error("credential entry {id} not found")]
    NotFound { id: EntryId },

    /// `initialize` was called on a vault that already has a wrapped master key.
    #[error("vault is already initialized")]
    AlreadyInitialized,

    /// The persistence layer failed (I/O, schema, transaction).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors (invalid values handed to a component).
    #[error("configuration error: {0}")]
    Config(String),

    /// Cryptographic primitive failures other than authentication
    /// (random source unavailable, key construction rejected).
    #[error("crypto error: {0}")]
    Crypto(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl StrongboxError {
    /// Wrap any storage-layer error.
    pub fn storage(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Storage {
            source: source.into(),
        }
    }
}
