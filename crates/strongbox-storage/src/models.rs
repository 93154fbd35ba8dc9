// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Row types, re-exported from `strongbox-core` where the trait boundaries live.

pub use strongbox_core::types::{CredentialRecord, EntryId, NewRecord, RecordPatch};
