// SPDX-FileCopyrightText: 2026 Strongbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Passphrase acquisition via TTY prompt or environment variable.

use std::io::IsTerminal;

use secrecy::SecretString;
use strongbox_core::StrongboxError;

/// Environment variable holding the current master password.
pub const PASSPHRASE_ENV_VAR: &str = "STRONGBOX_PASSPHRASE";

/// Environment variable holding the replacement password for `passwd`.
pub const NEW_PASSPHRASE_ENV_VAR: &str = "STRONGBOX_NEW_PASSPHRASE";

/// Environment variable holding an entry secret for `add` and `edit`.
pub const ENTRY_SECRET_ENV_VAR: &str = "STRONGBOX_ENTRY_SECRET";

fn from_env(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(value) if !value.is_empty() => Some(SecretString::from(value)),
        _ => None,
    }
}

fn read_tty(label: &str) -> Result<String, StrongboxError> {
    eprint!("{label}: ");
    rpassword::read_password()
        .map_err(|e| StrongboxError::Internal(format!("failed to read passphrase: {e}")))
}

fn no_source(var: &str) -> StrongboxError {
    StrongboxError::Config(format!(
        "no passphrase provided; set {var} or run interactively"
    ))
}

/// Get a passphrase from `var`, else prompt on the terminal.
///
/// An empty env var counts as unset. Outside a terminal with no env var this
/// is an error.
pub fn read_passphrase(var: &str, label: &str) -> Result<SecretString, StrongboxError> {
    if let Some(secret) = from_env(var) {
        return Ok(secret);
    }
    if !std::io::stdin().is_terminal() {
        return Err(no_source(var));
    }

    let passphrase = read_tty(label)?;
    if passphrase.is_empty() {
        return Err(StrongboxError::Config("empty passphrase not allowed".to_string()));
    }
    Ok(SecretString::from(passphrase))
}

/// Like [`read_passphrase`], but a terminal user must type it twice.
pub fn read_new_passphrase(var: &str, label: &str) -> Result<SecretString, StrongboxError> {
    if let Some(secret) = from_env(var) {
        return Ok(secret);
    }
    if !std::io::stdin().is_terminal() {
        return Err(no_source(var));
    }

    let first = read_tty(label)?;
    let second = read_tty(&format!("Confirm {}", label.to_lowercase()))?;
    if first != second {
        return Err(StrongboxError::Config("passphrases do not match".to_string()));
    }
    if first.is_empty() {
        return Err(StrongboxError::Config("empty passphrase not allowed".to_string()));
    }
    Ok(SecretString::from(first))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use serial_test::serial;

    #[test]
    #[serial]
    fn passphrase_from_env_var() {
        // SAFETY: env mutation is confined to #[serial] tests.
        unsafe { std::env::set_var(PASSPHRASE_ENV_VAR, "correct-horse") };
        let result = read_passphrase(PASSPHRASE_ENV_VAR, "Master password");
        unsafe { std::env::remove_var(PASSPHRASE_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "correct-horse");
    }

    #[test]
    #[serial]
    fn new_passphrase_from_env_var_skips_confirmation() {
        unsafe { std::env::set_var(NEW_PASSPHRASE_ENV_VAR, "new-pw") };
        let result = read_new_passphrase(NEW_PASSPHRASE_ENV_VAR, "New master password");
        unsafe { std::env::remove_var(NEW_PASSPHRASE_ENV_VAR) };

        assert_eq!(result.unwrap().expose_secret(), "new-pw");
    }

    #[test]
    #[serial]
    fn empty_env_var_counts_as_unset() {
        unsafe { std::env::set_var(PASSPHRASE_ENV_VAR, "") };
        let from = from_env(PASSPHRASE_ENV_VAR);
        unsafe { std::env::remove_var(PASSPHRASE_ENV_VAR) };

        assert!(from.is_none());
    }
}
