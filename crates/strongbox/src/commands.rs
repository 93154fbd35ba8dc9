// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Subcommand implementations.
//!
//! Output goes to the supplied writer; prompts and logs go to stderr.

use std::io::Write;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use strongbox_core::{EntryId, StrongboxError};
use strongbox_vault::prompt::{
    read_new_passphrase, read_passphrase, ENTRY_SECRET_ENV_VAR, NEW_PASSPHRASE_ENV_VAR,
    PASSPHRASE_ENV_VAR,
};
use strongbox_vault::{CredentialEntry, CredentialSummary, CredentialUpdate, NewCredential};

use crate::app::App;
use crate::cli::{Command, EditArgs};
use crate::status;

pub(crate) fn output_err(e: std::io::Error) -> StrongboxError {
    StrongboxError::Internal(format!("failed to write output: {e}"))
}

pub fn run(command: Command, app: &App, out: &mut dyn Write) -> Result<(), StrongboxError> {
    match command {
        Command::Init => init(app, out),
        Command::Status { json, plain } => status::run_status(app, json, plain, out),
        Command::Add {
            title,
            username,
            notes,
        } => add(app, title, username, notes, out),
        Command::Get { id } => get(app, EntryId(id), out),
        Command::List { json } => list(app, json, out),
        Command::Edit(args) => edit(app, args, out),
        Command::Rm { id } => remove(app, EntryId(id), out),
        Command::Passwd => passwd(app, out),
        Command::Forget { yes } => forget(app, yes, out),
    }
}

fn init(app: &App, out: &mut dyn Write) -> Result<(), StrongboxError> {
    if app.session.has_vault()? {
        return Err(StrongboxError::AlreadyInitialized);
    }
    let password = read_new_passphrase(PASSPHRASE_ENV_VAR, "New master password")?;
    app.session.initialize(&password)?;
    writeln!(out, "vault initialized at {}", app.db.path()).map_err(output_err)
}

fn add(
    app: &App,
    title: String,
    username: Option<String>,
    notes: Option<String>,
    out: &mut dyn Write,
) -> Result<(), StrongboxError> {
    app.unlock()?;
    let secret = read_passphrase(ENTRY_SECRET_ENV_VAR, "Secret")?;
    let id = app.store.create(NewCredential {
        title,
        username,
        secret,
        notes,
    })?;
    writeln!(out, "created entry {id}").map_err(output_err)
}

fn get(app: &App, id: EntryId, out: &mut dyn Write) -> Result<(), StrongboxError> {
    app.unlock()?;
    let entry = app.store.get(id)?;
    write_entry(&entry, out).map_err(output_err)
}

fn write_entry(entry: &CredentialEntry, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "Id:       {}", entry.id)?;
    writeln!(out, "Title:    {}", entry.title)?;
    writeln!(out, "Username: {}", entry.username.as_deref().unwrap_or("-"))?;
    writeln!(out, "Secret:   {}", entry.secret.expose_secret())?;
    writeln!(out, "Notes:    {}", entry.notes.as_deref().unwrap_or("-"))?;
    writeln!(out, "Created:  {}", format_timestamp(entry.created_at))?;
    writeln!(out, "Updated:  {}", format_timestamp(entry.updated_at))
}

/// One row of `list --json`.
#[derive(Debug, Serialize)]
struct ListedEntry<'a> {
    id: EntryId,
    title: &'a str,
    username: Option<&'a str>,
    secret: &'a str,
    notes: Option<&'a str>,
    created_at: i64,
    updated_at: i64,
}

impl<'a> From<&'a CredentialSummary> for ListedEntry<'a> {
    fn from(summary: &'a CredentialSummary) -> Self {
        Self {
            id: summary.id,
            title: &summary.title,
            username: summary.username.as_deref(),
            secret: summary.secret,
            notes: summary.notes.as_deref(),
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

fn list(app: &App, json: bool, out: &mut dyn Write) -> Result<(), StrongboxError> {
    let summaries = app.store.list_metadata()?;

    if json {
        let rows: Vec<ListedEntry<'_>> = summaries.iter().map(ListedEntry::from).collect();
        let rendered = serde_json::to_string_pretty(&rows)
            .map_err(|e| StrongboxError::Internal(format!("failed to render list: {e}")))?;
        return writeln!(out, "{rendered}").map_err(output_err);
    }

    if summaries.is_empty() {
        return writeln!(out, "no entries").map_err(output_err);
    }
    for s in &summaries {
        writeln!(
            out,
            "{:>5}  {:<24}  {:<20}  {}  {}",
            s.id,
            s.title,
            s.username.as_deref().unwrap_or("-"),
            s.secret,
            format_timestamp(s.updated_at),
        )
        .map_err(output_err)?;
    }
    Ok(())
}

/// Translate `edit` flags into a partial update.
fn edit_update(args: EditArgs, secret: Option<SecretString>) -> CredentialUpdate {
    let username = if args.clear_username {
        Some(None)
    } else {
        args.username.map(Some)
    };
    let notes = if args.clear_notes {
        Some(None)
    } else {
        args.notes.map(Some)
    };
    CredentialUpdate {
        title: args.title,
        username,
        secret,
        notes,
    }
}

fn edit(app: &App, args: EditArgs, out: &mut dyn Write) -> Result<(), StrongboxError> {
    app.unlock()?;
    let id = EntryId(args.id);
    let secret = if args.secret {
        Some(read_passphrase(ENTRY_SECRET_ENV_VAR, "New secret")?)
    } else {
        None
    };
    app.store.update(id, edit_update(args, secret))?;
    writeln!(out, "updated entry {id}").map_err(output_err)
}

fn remove(app: &App, id: EntryId, out: &mut dyn Write) -> Result<(), StrongboxError> {
    app.unlock()?;
    app.store.delete(id)?;
    writeln!(out, "removed entry {id}").map_err(output_err)
}

fn passwd(app: &App, out: &mut dyn Write) -> Result<(), StrongboxError> {
    let old = read_passphrase(PASSPHRASE_ENV_VAR, "Current master password")?;
    let new = read_new_passphrase(NEW_PASSPHRASE_ENV_VAR, "New master password")?;
    app.session.change_password(&old, &new)?;
    writeln!(out, "master password changed").map_err(output_err)
}

fn forget(app: &App, yes: bool, out: &mut dyn Write) -> Result<(), StrongboxError> {
    if !yes {
        return Err(StrongboxError::Internal(
            "forget destroys access to every stored secret; pass --yes to confirm".to_string(),
        ));
    }
    app.unlock()?;
    app.session.forget()?;
    writeln!(out, "vault key deleted").map_err(output_err)
}

fn format_timestamp(millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| millis.to_string())
}
