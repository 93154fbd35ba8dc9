// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PBKDF2-HMAC-SHA256 key derivation from a password.
//!
//! Produces the 256-bit key-encryption key that wraps the master secret.

use std::num::NonZeroU32;

use ring::pbkdf2;
use strongbox_core::StrongboxError;
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};

/// Salt length in bytes. Every wrap draws a fresh one.
pub const SALT_LEN: usize = 16;

/// Derive a 32-byte key from `password` and `salt`.
///
/// The returned key is wrapped in [`Zeroizing`] for automatic memory zeroing
/// on drop.
pub fn derive_key(
    password: &[u8],
    salt: &[u8],
    iterations: NonZeroU32,
) -> Zeroizing<[u8; KEY_LEN]> {
    let mut output = Zeroizing::new([0u8; KEY_LEN]);
    pbkdf2::derive(
        pbkdf2::PBKDF2_HMAC_SHA256,
        iterations,
        salt,
        password,
        output.as_mut(),
    );
    output
}

/// Generate a random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN], StrongboxError> {
    crypto::random_bytes()
}
