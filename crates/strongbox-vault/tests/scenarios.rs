// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end vault scenarios over an on-disk SQLite database.

use secrecy::{ExposeSecret, SecretString};
use strongbox_core::{EntryId, SessionStatus, SettingsStore, StrongboxError};
use strongbox_test_utils::{TestHarness, TEST_PASSWORD};
use strongbox_vault::{
    CredentialUpdate, NewCredential, VaultSession, WrappedMasterKey, REDACTED, WRAPPED_MASTER_KEY,
};

fn pw(s: &str) -> SecretString {
    SecretString::from(s.to_string())
}

fn bank() -> NewCredential {
    NewCredential {
        title: "Bank".to_string(),
        username: None,
        secret: pw("s3cret"),
        notes: None,
    }
}

#[test]
fn initialize_then_unlock_with_right_and_wrong_password() {
    let harness = TestHarness::new().unwrap();
    let session = harness.session();

    session.unlock(&pw("correct-horse")).unwrap();
    assert_eq!(session.status(), SessionStatus::Unlocked);

    // A fresh session over the same store rejects the wrong password.
    let harness = harness.restart().unwrap();
    let err = harness.session().unlock(&pw("wrong")).unwrap_err();
    assert!(matches!(err, StrongboxError::AuthenticationFailure));
    assert_eq!(harness.session().status(), SessionStatus::Locked);
}

#[test]
fn create_list_and_get_an_entry() {
    let harness = TestHarness::builder().unlocked().build().unwrap();
    let store = harness.store();

    let id = store.create(bank()).unwrap();
    assert_eq!(id, EntryId(1));

    let listed = store.list_metadata().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].title, "Bank");
    assert_eq!(listed[0].secret, REDACTED);

    let entry = store.get(id).unwrap();
    assert_eq!(entry.secret.expose_secret(), "s3cret");
}

#[test]
fn password_change_keeps_existing_entries_readable() {
    let harness = TestHarness::builder().unlocked().build().unwrap();
    let id = harness.store().create(bank()).unwrap();

    let session = harness.session();
    session
        .change_password(&pw(TEST_PASSWORD), &pw("new-pw"))
        .unwrap();
    session.lock();

    assert!(matches!(
        session.unlock(&pw(TEST_PASSWORD)),
        Err(StrongboxError::AuthenticationFailure)
    ));
    session.unlock(&pw("new-pw")).unwrap();
    assert_eq!(
        harness.store().get(id).unwrap().secret.expose_secret(),
        "s3cret"
    );
}

#[test]
fn entries_survive_restart() {
    let harness = TestHarness::builder().unlocked().build().unwrap();
    let id = harness
        .store()
        .create(NewCredential {
            title: "Mail".to_string(),
            username: Some("bob@example.com".to_string()),
            secret: pw("hunter2"),
            notes: Some("work".to_string()),
        })
        .unwrap();

    let harness = harness.restart().unwrap();
    assert!(!harness.session().is_unlocked());
    assert_eq!(harness.store().list_metadata().unwrap()[0].title, "Mail");

    harness.session().unlock(harness.password()).unwrap();
    let entry = harness.store().get(id).unwrap();
    assert_eq!(entry.username.as_deref(), Some("bob@example.com"));
    assert_eq!(entry.secret.expose_secret(), "hunter2");
}

#[test]
fn locked_vault_only_allows_listing() {
    let harness = TestHarness::builder().unlocked().build().unwrap();
    let store = harness.store();
    let id = store.create(bank()).unwrap();
    harness.session().lock();

    assert!(matches!(store.get(id), Err(StrongboxError::SessionLocked)));
    assert!(matches!(store.create(bank()), Err(StrongboxError::SessionLocked)));
    assert!(matches!(
        store.update(
            id,
            CredentialUpdate {
                title: Some("Other".to_string()),
                ..CredentialUpdate::default()
            }
        ),
        Err(StrongboxError::SessionLocked)
    ));

    assert!(matches!(store.delete(id), Err(StrongboxError::SessionLocked)));
    assert_eq!(store.list_metadata().unwrap().len(), 1);

    harness.session().unlock(harness.password()).unwrap();
    store.delete(id).unwrap();
    assert!(store.list_metadata().unwrap().is_empty());
}

#[test]
fn second_session_reads_blob_written_by_first() {
    let harness = TestHarness::builder().unlocked().build().unwrap();
    let blob = harness.store().session().encrypt_with_session(b"shared").unwrap();

    let other = VaultSession::with_iterations(
        harness.database().clone(),
        std::num::NonZeroU32::new(strongbox_test_utils::TEST_KDF_ITERATIONS).unwrap(),
    );
    other.unlock(harness.password()).unwrap();
    assert_eq!(other.decrypt_with_session(&blob).unwrap().as_slice(), b"shared");
}

#[test]
fn persisted_blob_is_well_formed_base64() {
    let harness = TestHarness::new().unwrap();
    let blob = harness
        .database()
        .get(WRAPPED_MASTER_KEY)
        .unwrap()
        .expect("initialized vault has a wrapped key");
    assert!(WrappedMasterKey::decode(&blob).is_ok());
}

#[test]
fn uninitialized_vault_reports_absence() {
    let harness = TestHarness::builder().uninitialized().build().unwrap();
    assert!(!harness.session().has_vault().unwrap());
    assert!(matches!(
        harness.session().unlock(harness.password()),
        Err(StrongboxError::AuthenticationFailure)
    ));

    harness.session().initialize(harness.password()).unwrap();
    assert!(matches!(
        harness.session().initialize(harness.password()),
        Err(StrongboxError::AlreadyInitialized)
    ));
}

#[test]
fn forget_makes_entries_unrecoverable() {
    let harness = TestHarness::builder().unlocked().build().unwrap();
    let id = harness.store().create(bank()).unwrap();

    harness.session().forget().unwrap();
    assert!(!harness.session().has_vault().unwrap());

    // A new vault has a different master secret.
    harness.session().initialize(&pw("fresh")).unwrap();
    harness.session().unlock(&pw("fresh")).unwrap();
    assert!(matches!(
        harness.store().get(id),
        Err(StrongboxError::AuthenticationFailure)
    ));
}
