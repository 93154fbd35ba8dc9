// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits for the persistence layer.
//!
//! Both traits are synchronous: every call blocks until the backend has
//! committed or failed, and each call is atomic on its own.

pub mod records;
pub mod settings;

pub use records::RecordStore;
pub use settings::SettingsStore;
