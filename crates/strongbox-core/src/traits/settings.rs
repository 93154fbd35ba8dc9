// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Key-value settings store.

use crate::error::StrongboxError;

/// Unique string key to string value table.
///
/// The vault reserves one key for the wrapped master key; everything else is
/// free-form application settings. Plaintext secrets must never be stored here.
pub trait SettingsStore: Send + Sync {
    /// Returns the value for `key`, if present.
    fn get(&self, key: &str) -> Result<Option<String>, StrongboxError>;

    /// Inserts or replaces the value for `key` in a single atomic write.
    fn put(&self, key: &str, value: &str) -> Result<(), StrongboxError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> Result<(), StrongboxError>;
}
