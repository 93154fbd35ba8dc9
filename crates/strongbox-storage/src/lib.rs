// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence backends for the Strongbox vault.
//!
//! [`Database`] is a SQLite file with embedded migrations that implements both
//! [`SettingsStore`](strongbox_core::SettingsStore) and
//! [`RecordStore`](strongbox_core::RecordStore). [`MemorySettings`] and
//! [`MemoryRecords`] are volatile equivalents for tests and embedding.

pub mod adapter;
pub mod database;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod queries;

pub use database::Database;
pub use memory::{MemoryRecords, MemorySettings};
