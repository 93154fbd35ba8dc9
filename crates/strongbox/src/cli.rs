// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Strongbox - a local, password-gated credential vault.
#[derive(Parser, Debug)]
#[command(name = "strongbox", version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, short, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the vault and set the master password.
    Init,
    /// Show whether a vault exists and how many entries it holds.
    Status {
        /// Print JSON for scripting.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Add a credential. The secret is read from STRONGBOX_ENTRY_SECRET or a prompt.
    Add {
        title: String,
        #[arg(long, short)]
        username: Option<String>,
        #[arg(long, short)]
        notes: Option<String>,
    },
    /// Show one credential, secret included.
    Get { id: i64 },
    /// List credentials without decrypting them.
    List {
        /// Print JSON for scripting.
        #[arg(long)]
        json: bool,
    },
    /// Change fields of a credential.
    Edit(EditArgs),
    /// Delete a credential.
    Rm { id: i64 },
    /// Change the master password.
    Passwd,
    /// Delete the wrapped master key. Every stored secret becomes unrecoverable.
    Forget {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct EditArgs {
    pub id: i64,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_username")]
    pub username: Option<String>,
    #[arg(long)]
    pub clear_username: bool,
    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,
    #[arg(long)]
    pub clear_notes: bool,
    /// Prompt for a new secret (or read STRONGBOX_ENTRY_SECRET).
    #[arg(long)]
    pub secret: bool,
}
