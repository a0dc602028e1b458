//! Delete command handler - removing an alias from the keystore.

use super::Outcome;
use crate::error::Result;
use crate::shell::Shell;

/// Handle `delete ALIAS`
pub fn handle_delete(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let [alias] = args else {
        return Ok(Outcome::BadUsage);
    };
    shell.store.delete(&mut shell.console, alias)?;
    Ok(Outcome::Ok(true))
}
