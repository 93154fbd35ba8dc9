// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Master-key session: initialize, unlock, lock, and password changes.
//!
//! The vault uses a key-wrapping pattern:
//! - A random master secret encrypts every entry secret.
//! - The master secret itself is sealed under a key derived from the user's
//!   password via PBKDF2 and stored in settings under
//!   [`WRAPPED_MASTER_KEY`].
//! - Changing the password only re-wraps the master secret; entries are never
//!   re-encrypted.
//!
//! The unwrapped secret lives only inside the session's `RwLock` and is
//! zeroed when the session locks or is dropped. Nothing hands out the raw
//! key: callers encrypt and decrypt through the session.

use std::num::NonZeroU32;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use secrecy::{ExposeSecret, SecretString};
use strongbox_config::model::VaultConfig;
use strongbox_core::{SessionStatus, SettingsStore, StrongboxError};
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

use crate::crypto::{self, KEY_LEN};
use crate::envelope::{SealedSecret, WrappedMasterKey, WRAPPED_MASTER_KEY};

pub(crate) enum SessionState {
    Locked,
    Unlocked(Zeroizing<[u8; KEY_LEN]>),
}

impl SessionState {
    pub(crate) fn status(&self) -> SessionStatus {
        match self {
            Self::Locked => SessionStatus::Locked,
            Self::Unlocked(_) => SessionStatus::Unlocked,
        }
    }
}

/// A locked or unlocked view of one vault.
///
/// Debug output intentionally omits the master secret.
pub struct VaultSession {
    settings: Arc<dyn SettingsStore>,
    kdf_iterations: NonZeroU32,
    state: RwLock<SessionState>,
}

impl std::fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultSession")
            .field("kdf_iterations", &self.kdf_iterations)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl VaultSession {
    /// Build a locked session over `settings` using the configured KDF cost.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        config: &VaultConfig,
    ) -> Result<Self, StrongboxError> {
        let iterations = NonZeroU32::new(config.kdf_iterations).ok_or_else(|| {
            StrongboxError::Config("vault.kdf_iterations must be greater than zero".to_string())
        })?;
        Ok(Self::with_iterations(settings, iterations))
    }

    pub fn with_iterations(settings: Arc<dyn SettingsStore>, kdf_iterations: NonZeroU32) -> Self {
        Self {
            settings,
            kdf_iterations,
            state: RwLock::new(SessionState::Locked),
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.read_state().status()
    }

    pub fn is_unlocked(&self) -> bool {
        self.status() == SessionStatus::Unlocked
    }

    /// Whether a wrapped master key has been persisted.
    pub fn has_vault(&self) -> Result<bool, StrongboxError> {
        Ok(self.settings.get(WRAPPED_MASTER_KEY)?.is_some())
    }

    /// Create the vault: generate a master secret and persist it wrapped
    /// under `password`. The session stays locked.
    pub fn initialize(&self, password: &SecretString) -> Result<(), StrongboxError> {
        let _state = self.write_state();
        if self.settings.get(WRAPPED_MASTER_KEY)?.is_some() {
            return Err(StrongboxError::AlreadyInitialized);
        }

        let master = crypto::generate_random_key()?;
        let wrapped = WrappedMasterKey::wrap(
            &master,
            password.expose_secret().as_bytes(),
            self.kdf_iterations,
        )?;
        self.settings.put(WRAPPED_MASTER_KEY, &wrapped.encode())?;

        info!("vault initialized");
        Ok(())
    }

    /// Unwrap the master secret with `password` and hold it in memory.
    ///
    /// Any previously held secret is dropped first, so a failed attempt always
    /// leaves the session locked.
    pub fn unlock(&self, password: &SecretString) -> Result<(), StrongboxError> {
        let mut state = self.write_state();
        *state = SessionState::Locked;

        let Some(encoded) = self.settings.get(WRAPPED_MASTER_KEY)? else {
            warn!("unlock attempted but no vault is initialized");
            return Err(StrongboxError::AuthenticationFailure);
        };
        let master = WrappedMasterKey::decode(&encoded)
            .and_then(|w| w.unwrap_with(password.expose_secret().as_bytes(), self.kdf_iterations))
            .inspect_err(|_| warn!("unlock failed: authentication failure"))?;

        *state = SessionState::Unlocked(master);
        debug!("vault unlocked");
        Ok(())
    }

    /// Zero and drop the master secret. Locking a locked session is a no-op.
    pub fn lock(&self) {
        let mut state = self.write_state();
        if matches!(*state, SessionState::Unlocked(_)) {
            *state = SessionState::Locked;
            debug!("vault locked");
        }
    }

    /// Re-wrap the master secret under `new` after proving `old`.
    ///
    /// The stored blob is replaced in a single write; on any failure the old
    /// blob stays valid. The session's own state is not touched.
    pub fn change_password(
        &self,
        old: &SecretString,
        new: &SecretString,
    ) -> Result<(), StrongboxError> {
        let _state = self.write_state();

        let Some(encoded) = self.settings.get(WRAPPED_MASTER_KEY)? else {
            return Err(StrongboxError::AuthenticationFailure);
        };
        let master = WrappedMasterKey::decode(&encoded)
            .and_then(|w| w.unwrap_with(old.expose_secret().as_bytes(), self.kdf_iterations))
            .inspect_err(|_| warn!("password change rejected: authentication failure"))?;

        self.store_wrapped(&master, new)?;
        info!("vault password changed");
        Ok(())
    }

    /// Re-wrap the in-memory master secret under `new`. Requires an unlocked
    /// session.
    pub fn rewrap_from_session(&self, new: &SecretString) -> Result<(), StrongboxError> {
        let state = self.write_state();
        let SessionState::Unlocked(master) = &*state else {
            return Err(StrongboxError::SessionLocked);
        };
        self.store_wrapped(master, new)?;
        info!("vault password changed from unlocked session");
        Ok(())
    }

    /// Delete the wrapped master key and lock. Every stored entry becomes
    /// unrecoverable. Requires an unlocked session.
    pub fn forget(&self) -> Result<(), StrongboxError> {
        let mut state = self.write_state();
        if !matches!(*state, SessionState::Unlocked(_)) {
            return Err(StrongboxError::SessionLocked);
        }
        self.settings.delete(WRAPPED_MASTER_KEY)?;
        *state = SessionState::Locked;
        info!("vault forgotten, wrapped master key deleted");
        Ok(())
    }

    /// Seal `plaintext` under the master secret; returns the encoded blob.
    pub fn encrypt_with_session(&self, plaintext: &[u8]) -> Result<String, StrongboxError> {
        self.with_active_key(|key| Ok(SealedSecret::seal(key, plaintext)?.encode()))
    }

    /// Open a blob produced by [`encrypt_with_session`](Self::encrypt_with_session).
    pub fn decrypt_with_session(&self, blob: &str) -> Result<Zeroizing<Vec<u8>>, StrongboxError> {
        self.with_active_key(|key| SealedSecret::decode(blob)?.open(key))
    }

    /// Run `f` with the master secret while holding the read lock.
    fn with_active_key<T>(
        &self,
        f: impl FnOnce(&[u8; KEY_LEN]) -> Result<T, StrongboxError>,
    ) -> Result<T, StrongboxError> {
        match &*self.read_state() {
            SessionState::Unlocked(key) => f(&**key),
            SessionState::Locked => Err(StrongboxError::SessionLocked),
        }
    }

    fn store_wrapped(
        &self,
        master: &[u8; KEY_LEN],
        password: &SecretString,
    ) -> Result<(), StrongboxError> {
        let wrapped = WrappedMasterKey::wrap(
            master,
            password.expose_secret().as_bytes(),
            self.kdf_iterations,
        )?;
        self.settings.put(WRAPPED_MASTER_KEY, &wrapped.encode())
    }

    pub(crate) fn read_state(&self) -> RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}
