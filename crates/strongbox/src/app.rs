// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The vault stack for one CLI invocation.

use std::sync::Arc;

use strongbox_config::StrongboxConfig;
use strongbox_core::StrongboxError;
use strongbox_storage::Database;
use strongbox_vault::prompt::{read_passphrase, PASSPHRASE_ENV_VAR};
use strongbox_vault::{CredentialStore, VaultSession};
use tracing::debug;

pub struct App {
    pub config: StrongboxConfig,
    pub db: Arc<Database>,
    pub session: Arc<VaultSession>,
    pub store: CredentialStore,
}

impl App {
    pub fn open(config: &StrongboxConfig) -> Result<Self, StrongboxError> {
        let db = Arc::new(Database::open_with_config(&config.storage)?);
        let session = Arc::new(VaultSession::new(db.clone(), &config.vault)?);
        let store = CredentialStore::new(
            db.clone(),
            session.clone(),
            config.credentials.list_limit,
        );
        debug!(database = %db.path(), status = %session.status(), "vault opened");
        Ok(Self {
            config: config.clone(),
            db,
            session,
            store,
        })
    }

    /// Ask for the master password and unlock the session.
    pub fn unlock(&self) -> Result<(), StrongboxError> {
        let password = read_passphrase(PASSPHRASE_ENV_VAR, "Master password")?;
        self.session.unlock(&password)
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.session.lock();
    }
}
