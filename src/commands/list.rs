//! List command handlers - showing what is in the keystore.

use super::Outcome;
use crate::error::Result;
use crate::shell::Shell;

/// Handle `ls [-l]`
pub fn handle_ls(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let verbose = match args {
        [] => false,
        [flag] if flag == "-l" => true,
        _ => return Ok(Outcome::BadUsage),
    };
    shell.store.list(&mut shell.console, verbose)?;
    Ok(Outcome::Ok(true))
}

/// Handle `ll` - shorthand for `ls -l`
pub fn handle_ll(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    if !args.is_empty() {
        return Ok(Outcome::BadUsage);
    }
    shell.store.list(&mut shell.console, true)?;
    Ok(Outcome::Ok(true))
}
