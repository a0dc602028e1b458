//! Fetch and put handlers - moving keystore files in and out of the session.

use std::path::Path;

use tracing::info;

use super::Outcome;
use crate::config::expand_tilde;
use crate::error::{KeyshellError, Result};
use crate::shell::Shell;
use crate::utils::{copy_file, restrict_file_permissions};

/// Handle `fetch PATH` - copy a keystore into the working file and open it
pub fn handle_fetch(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let [source] = args else {
        return Ok(Outcome::BadUsage);
    };
    let source = expand_tilde(source);
    let working = shell.config.working_store();

    shell.console.echo(&format!(
        "copyfile('{}', '{}')",
        source.display(),
        working.display()
    ))?;
    copy_file(&source, &working)?;
    // The working copy holds private keys as often as not.
    restrict_file_permissions(&working)?;

    info!("fetched {} into {}", source.display(), working.display());
    shell.store.set_path(working);
    Ok(Outcome::Ok(true))
}

/// Handle `put PATH` - copy the open keystore out to PATH
pub fn handle_put(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let [dest] = args else {
        return Ok(Outcome::BadUsage);
    };
    let current = shell
        .store
        .path()
        .map(Path::to_path_buf)
        .ok_or(KeyshellError::NoStore)?;
    let dest = expand_tilde(dest);

    shell.console.echo(&format!(
        "copyfile('{}', '{}')",
        current.display(),
        dest.display()
    ))?;
    copy_file(&current, &dest)?;

    info!("put {} to {}", current.display(), dest.display());
    Ok(Outcome::Ok(true))
}
