//! Rename command handler.

use super::Outcome;
use crate::error::Result;
use crate::shell::Shell;

/// Handle `rename OLD_ALIAS NEW_ALIAS`
pub fn handle_rename(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let [old_alias, new_alias] = args else {
        return Ok(Outcome::BadUsage);
    };
    shell
        .store
        .alias(old_alias)
        .rename(&mut shell.console, new_alias)?;
    Ok(Outcome::Ok(true))
}
