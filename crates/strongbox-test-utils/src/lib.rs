// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Strongbox integration tests.
//!
//! [`TestHarness`] wires a temp SQLite database, a [`VaultSession`] with a
//! cheap KDF, and a [`CredentialStore`] together so scenario tests can drive
//! the whole stack without touching the user's data directory.
//!
//! [`VaultSession`]: strongbox_vault::VaultSession
//! [`CredentialStore`]: strongbox_vault::CredentialStore

pub mod harness;

pub use harness::{TestHarness, TestHarnessBuilder, TEST_KDF_ITERATIONS, TEST_PASSWORD};
