//! Session command handlers - help, password and quit.

use std::io::Write;

use super::Outcome;
use crate::credentials::prompt_password;
use crate::error::{KeyshellError, Result};
use crate::shell::Shell;

/// Handle `help` - list every command once, in registration order
pub fn handle_help(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    if !args.is_empty() {
        return Ok(Outcome::BadUsage);
    }
    let registry = shell.registry();
    let out = shell.console.out();
    writeln!(out, "Commands:")?;
    for command in registry.commands() {
        writeln!(out, "  {}", command.usage)?;
    }
    writeln!(out)?;
    Ok(Outcome::Info)
}

/// Handle `password` - ask for a new keystore password right away.
///
/// Cancelling forgets the old password, so the next keytool call prompts.
pub fn handle_password(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    if !args.is_empty() {
        return Ok(Outcome::BadUsage);
    }
    let entered = prompt_password(shell.console.terminal())?;
    let cancelled = entered.is_none();
    shell.store.password_mut().set(entered);
    if cancelled {
        return Err(KeyshellError::Cancelled);
    }
    Ok(Outcome::Ok(true))
}

/// Handle `quit`
pub fn handle_quit(_shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    if !args.is_empty() {
        return Ok(Outcome::BadUsage);
    }
    Ok(Outcome::Exit)
}
