// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Low-level AES-256-GCM seal/open operations.
//!
//! Every call to [`seal`] generates a fresh random 96-bit nonce from one
//! process-wide [`SystemRandom`]. Nonce reuse would be catastrophic for GCM
//! security.

use std::sync::LazyLock;

use ring::aead::{Aad, LessSafeKey, Nonce, UnboundKey, AES_256_GCM};
use ring::rand::{SecureRandom, SystemRandom};
use strongbox_core::StrongboxError;
use zeroize::Zeroizing;

/// AES-256 key length.
pub const KEY_LEN: usize = 32;
/// GCM nonce length.
pub const NONCE_LEN: usize = 12;
/// GCM authentication tag length.
pub const TAG_LEN: usize = 16;

static RNG: LazyLock<SystemRandom> = LazyLock::new(SystemRandom::new);

/// Fill an `N`-byte array from the shared CSPRNG.
pub(crate) fn random_bytes<const N: usize>() -> Result<[u8; N], StrongboxError> {
    let mut out = [0u8; N];
    RNG.fill(&mut out)
        .map_err(|_| StrongboxError::Crypto("system random source unavailable".to_string()))?;
    Ok(out)
}

fn aead_key(key: &[u8; KEY_LEN]) -> Result<LessSafeKey, StrongboxError> {
    let unbound = UnboundKey::new(&AES_256_GCM, key)
        .map_err(|_| StrongboxError::Crypto("failed to create AES-256-GCM key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// Returns `(nonce, ciphertext_with_tag)`.
pub fn seal(
    key: &[u8; KEY_LEN],
    plaintext: &[u8],
) -> Result<([u8; NONCE_LEN], Vec<u8>), StrongboxError> {
    let key = aead_key(key)?;
    let nonce_bytes: [u8; NONCE_LEN] = random_bytes()?;

    let mut in_out = plaintext.to_vec();
    key.seal_in_place_append_tag(
        Nonce::assume_unique_for_key(nonce_bytes),
        Aad::empty(),
        &mut in_out,
    )
    .map_err(|_| StrongboxError::Crypto("AES-256-GCM encryption failed".to_string()))?;

    Ok((nonce_bytes, in_out))
}

/// Decrypt `ciphertext` (which carries the 16-byte tag) under `key`.
///
/// Wrong key, wrong nonce, and any tampering all yield
/// [`StrongboxError::AuthenticationFailure`].
pub fn open(
    key: &[u8; KEY_LEN],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
) -> Result<Zeroizing<Vec<u8>>, StrongboxError> {
    let key = aead_key(key)?;

    let mut in_out = Zeroizing::new(ciphertext.to_vec());
    let plaintext_len = key
        .open_in_place(
            Nonce::assume_unique_for_key(*nonce),
            Aad::empty(),
            in_out.as_mut_slice(),
        )
        .map_err(|_| StrongboxError::AuthenticationFailure)?
        .len();
    in_out.truncate(plaintext_len);

    Ok(in_out)
}

/// Generate a random 32-byte key suitable for AES-256-GCM.
pub fn generate_random_key() -> Result<Zeroizing<[u8; KEY_LEN]>, StrongboxError> {
    Ok(Zeroizing::new(random_bytes()?))
}
