// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed SQL for each table.

pub mod credentials;
pub mod settings;
