//! Add command handler - importing a certificate file.

use super::Outcome;
use crate::error::Result;
use crate::shell::Shell;

/// Handle `add ALIAS FILE`
pub fn handle_add(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let [alias, file] = args else {
        return Ok(Outcome::BadUsage);
    };
    shell.store.import(&mut shell.console, alias, file)?;
    Ok(Outcome::Ok(true))
}
