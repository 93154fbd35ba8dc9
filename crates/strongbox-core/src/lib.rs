// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Strongbox credential vault.
//!
//! Holds the error taxonomy shared by every crate in the workspace, the
//! record types exchanged with persistence backends, and the two collaborator
//! traits ([`SettingsStore`], [`RecordStore`]) that the vault is written against.

pub mod error;
pub mod traits;
pub mod types;

pub use error::StrongboxError;
pub use traits::{RecordStore, SettingsStore};
pub use types::{CredentialRecord, EntryId, NewRecord, RecordPatch, SessionStatus};
