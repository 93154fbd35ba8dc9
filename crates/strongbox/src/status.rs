// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `strongbox status` command implementation.
//!
//! Reports whether a vault exists, the session state, and the entry count.
//! Needs no password.

use std::io::{IsTerminal, Write};

use serde::Serialize;
use strongbox_core::{SessionStatus, StrongboxError};

use crate::app::App;
use crate::commands::output_err;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub initialized: bool,
    pub session: SessionStatus,
    pub entries: usize,
    pub database_path: String,
    pub kdf_iterations: u32,
}

impl StatusReport {
    pub fn collect(app: &App) -> Result<Self, StrongboxError> {
        Ok(Self {
            initialized: app.session.has_vault()?,
            session: app.session.status(),
            entries: app.store.list_metadata()?.len(),
            database_path: app.db.path().to_string(),
            kdf_iterations: app.config.vault.kdf_iterations,
        })
    }
}

/// Run the `strongbox status` command.
///
/// If `json` is set, outputs structured JSON for scripting. If `plain` is set
/// or stdout is not a TTY, disables colors.
pub fn run_status(
    app: &App,
    json: bool,
    plain: bool,
    out: &mut dyn Write,
) -> Result<(), StrongboxError> {
    let report = StatusReport::collect(app)?;

    if json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| StrongboxError::Internal(format!("failed to render status: {e}")))?;
        writeln!(out, "{rendered}").map_err(output_err)?;
    } else {
        let use_color = !plain && std::io::stdout().is_terminal();
        print_report(&report, use_color, out).map_err(output_err)?;
    }
    Ok(())
}

fn print_report(report: &StatusReport, use_color: bool, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  strongbox status")?;
    writeln!(out, "  {}", "-".repeat(35))?;

    let state = if report.initialized {
        "initialized"
    } else {
        "not initialized"
    };
    if use_color {
        use colored::Colorize;
        let state = if report.initialized {
            format!("{} {}", "✓".green(), state.green())
        } else {
            format!("{} {}", "✗".yellow(), state.yellow())
        };
        writeln!(out, "    Vault:    {state}")?;
    } else if report.initialized {
        writeln!(out, "    Vault:    [OK] {state}")?;
    } else {
        writeln!(out, "    Vault:    [--] {state}")?;
    }

    writeln!(out, "    Session:  {}", report.session)?;
    writeln!(out, "    Entries:  {}", report.entries)?;
    writeln!(out, "    Database: {}", report.database_path)?;
    writeln!(out)?;

    if !report.initialized {
        writeln!(out, "  Create one with: strongbox init")?;
        writeln!(out)?;
    }
    Ok(())
}
