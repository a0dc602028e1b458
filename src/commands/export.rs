//! Export command handler - writing a certificate out as PEM.

use std::path::Path;

use super::Outcome;
use crate::error::{KeyshellError, Result};
use crate::shell::Shell;

/// Handle `export ALIAS [FILE]`
///
/// An existing FILE is only replaced after the user confirms.
pub fn handle_export(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let (alias, file) = match args {
        [alias] => (alias, None),
        [alias, file] => (alias, Some(file.as_str())),
        _ => return Ok(Outcome::BadUsage),
    };

    // No point asking about the file if keytool can't run anyway.
    if shell.store.path().is_none() {
        return Err(KeyshellError::NoStore);
    }
    if let Some(file) = file
        && !shell.console.confirm_overwrite(Path::new(file))?
    {
        return Ok(Outcome::Info);
    }

    shell.store.alias(alias).export(&mut shell.console, file)?;
    Ok(Outcome::Ok(true))
}
