// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted blob layouts.
//!
//! Both are standard base64 (with padding):
//!
//! - wrapped master key: `salt(16) ‖ nonce(12) ‖ ciphertext ‖ tag(16)`
//! - sealed entry secret: `nonce(12) ‖ ciphertext ‖ tag(16)`
//!
//! Anything that fails to decode is reported as
//! [`StrongboxError::AuthenticationFailure`], the same as a bad tag.

use std::num::NonZeroU32;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use strongbox_core::StrongboxError;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN, NONCE_LEN, TAG_LEN};
use crate::kdf::{self, SALT_LEN};

/// Settings key holding the wrapped master key.
pub const WRAPPED_MASTER_KEY: &str = "auth.wrapped_master";

/// The master secret sealed under a password-derived key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedMasterKey {
    salt: [u8; SALT_LEN],
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl WrappedMasterKey {
    /// Smallest decodable blob: salt, nonce and a bare tag.
    pub const MIN_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

    /// Seal `master` under a key derived from `password` with a fresh salt.
    pub fn wrap(
        master: &[u8; KEY_LEN],
        password: &[u8],
        iterations: NonZeroU32,
    ) -> Result<Self, StrongboxError> {
        let salt = kdf::generate_salt()?;
        let kek = kdf::derive_key(password, &salt, iterations);
        let (nonce, ciphertext) = crypto::seal(&kek, master)?;
        Ok(Self {
            salt,
            nonce,
            ciphertext,
        })
    }

    /// Recover the master secret. Any mismatch is an authentication failure.
    pub fn unwrap_with(
        &self,
        password: &[u8],
        iterations: NonZeroU32,
    ) -> Result<Zeroizing<[u8; KEY_LEN]>, StrongboxError> {
        let kek = kdf::derive_key(password, &self.salt, iterations);
        let plaintext = crypto::open(&kek, &self.nonce, &self.ciphertext)?;
        let mut master = Zeroizing::new([0u8; KEY_LEN]);
        if plaintext.len() != KEY_LEN {
            return Err(StrongboxError::AuthenticationFailure);
        }
        master.copy_from_slice(&plaintext);
        Ok(master)
    }

    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(SALT_LEN + NONCE_LEN + self.ciphertext.len());
        raw.extend_from_slice(&self.salt);
        raw.extend_from_slice(&self.nonce);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    pub fn decode(encoded: &str) -> Result<Self, StrongboxError> {
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|_| StrongboxError::AuthenticationFailure)?;
        if raw.len() < Self::MIN_LEN {
            return Err(StrongboxError::AuthenticationFailure);
        }
        let (salt, rest) = raw.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);
        Ok(Self {
            salt: salt
                .try_into()
                .map_err(|_| StrongboxError::AuthenticationFailure)?,
            nonce: nonce
                .try_into()
                .map_err(|_| StrongboxError::AuthenticationFailure)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// One entry secret sealed under the master secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedSecret {
    nonce: [u8; NONCE_LEN],
    ciphertext: Vec<u8>,
}

impl SealedSecret {
    /// Smallest decodable blob: nonce and a bare tag.
    pub const MIN_LEN: usize = NONCE_LEN + TAG_LEN;

    pub fn seal(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<Self, StrongboxError> {
        let (nonce, ciphertext) = crypto::seal(key, plaintext)?;
        Ok(Self { nonce, ciphertext })
    }

    pub fn open(&self, key: &[u8; KEY_LEN]) -> Result<Zeroizing<Vec<u8>>, StrongboxError> {
        crypto::open(key, &self.nonce, &self.ciphertext)
    }

    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(NONCE_LEN + self.ciphertext.len());
        raw.extend_from_slice(&self.nonce);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    pub fn decode(encoded: &str) -> Result<Self, StrongboxError> {
        let raw = STANDARD
            .decode(encoded.trim())
            .map_err(|_| StrongboxError::AuthenticationFailure)?;
        if raw.len() < Self::MIN_LEN {
            return Err(StrongboxError::AuthenticationFailure);
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        Ok(Self {
            nonce: nonce
                .try_into()
                .map_err(|_| StrongboxError::AuthenticationFailure)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
