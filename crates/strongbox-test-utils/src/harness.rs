// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temp-database harness for end-to-end vault tests.

use std::path::PathBuf;
use std::sync::Arc;

use secrecy::SecretString;
use strongbox_config::model::VaultConfig;
use strongbox_core::StrongboxError;
use strongbox_storage::Database;
use strongbox_vault::{CredentialStore, VaultSession};

/// Password used by harnesses unless overridden.
pub const TEST_PASSWORD: &str = "correct-horse";

/// PBKDF2 cost for tests; far below production so suites stay fast.
pub const TEST_KDF_ITERATIONS: u32 = 1_000;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    password: String,
    list_limit: usize,
    initialize: bool,
    unlock: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            password: TEST_PASSWORD.to_string(),
            list_limit: 100,
            initialize: true,
            unlock: false,
        }
    }

    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    pub fn with_list_limit(mut self, limit: usize) -> Self {
        self.list_limit = limit;
        self
    }

    /// Leave the vault uninitialized (no wrapped master key).
    pub fn uninitialized(mut self) -> Self {
        self.initialize = false;
        self.unlock = false;
        self
    }

    /// Initialize and unlock before handing the harness over.
    pub fn unlocked(mut self) -> Self {
        self.initialize = true;
        self.unlock = true;
        self
    }

    pub fn build(self) -> Result<TestHarness, StrongboxError> {
        let temp_dir = tempfile::TempDir::new().map_err(StrongboxError::storage)?;
        let db_path = temp_dir.path().join("strongbox-test.db");
        let db = Arc::new(Database::open(&db_path.to_string_lossy())?);

        let harness = TestHarness::assemble(
            temp_dir,
            db_path,
            db,
            SecretString::from(self.password),
            self.list_limit,
        )?;

        if self.initialize {
            harness.session.initialize(&harness.password)?;
        }
        if self.unlock {
            harness.session.unlock(&harness.password)?;
        }
        Ok(harness)
    }
}

/// A vault stack over a database that is deleted on drop.
pub struct TestHarness {
    _temp_dir: tempfile::TempDir,
    db_path: PathBuf,
    db: Arc<Database>,
    session: Arc<VaultSession>,
    store: CredentialStore,
    password: SecretString,
    list_limit: usize,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Initialized, locked vault with [`TEST_PASSWORD`].
    pub fn new() -> Result<Self, StrongboxError> {
        Self::builder().build()
    }

    fn assemble(
        temp_dir: tempfile::TempDir,
        db_path: PathBuf,
        db: Arc<Database>,
        password: SecretString,
        list_limit: usize,
    ) -> Result<Self, StrongboxError> {
        let config = VaultConfig {
            kdf_iterations: TEST_KDF_ITERATIONS,
        };
        let session = Arc::new(VaultSession::new(db.clone(), &config)?);
        let store = CredentialStore::new(db.clone(), session.clone(), list_limit);
        Ok(Self {
            _temp_dir: temp_dir,
            db_path,
            db,
            session,
            store,
            password,
            list_limit,
        })
    }

    /// Drop the in-memory stack and reopen the same file with a fresh,
    /// locked session, as a new process would.
    pub fn restart(self) -> Result<Self, StrongboxError> {
        let Self {
            _temp_dir,
            db_path,
            db,
            session,
            store,
            password,
            list_limit,
        } = self;
        drop(store);
        drop(session);
        drop(db);

        let db = Arc::new(Database::open(&db_path.to_string_lossy())?);
        Self::assemble(_temp_dir, db_path, db, password, list_limit)
    }

    pub fn session(&self) -> &Arc<VaultSession> {
        &self.session
    }

    pub fn store(&self) -> &CredentialStore {
        &self.store
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    /// The password the harness was built with.
    pub fn password(&self) -> &SecretString {
        &self.password
    }
}
