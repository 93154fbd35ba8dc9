// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Envelope-encrypted credential vault.
//!
//! A random 256-bit master secret encrypts every entry secret with
//! AES-256-GCM. The master secret is stored only wrapped under a key derived
//! from the master password with PBKDF2-HMAC-SHA256. [`VaultSession`] owns the
//! locked/unlocked lifecycle; [`CredentialStore`] layers entry CRUD on top.

pub mod credentials;
pub mod crypto;
pub mod envelope;
pub mod kdf;
pub mod prompt;
pub mod session;

pub use credentials::{
    CredentialEntry, CredentialStore, CredentialSummary, CredentialUpdate, NewCredential,
    REDACTED,
};
pub use envelope::{SealedSecret, WrappedMasterKey, WRAPPED_MASTER_KEY};
pub use prompt::{read_new_passphrase, read_passphrase};
pub use session::VaultSession;
