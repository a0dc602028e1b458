//! Download command handler - fetching a server's certificate.

use super::Outcome;
use crate::download::Downloader;
use crate::error::Result;
use crate::shell::Shell;

/// Handle `download HOST PORT [FILE]`
pub fn handle_download(shell: &mut Shell, args: &[String]) -> Result<Outcome> {
    let (host, port, pem_file) = match args {
        [host, port] => (host, port, None),
        [host, port, file] => (host, port, Some(file.as_str())),
        _ => return Ok(Outcome::BadUsage),
    };
    let Ok(port) = port.parse::<u16>() else {
        return Ok(Outcome::BadUsage);
    };

    let openssl = shell.config.openssl();
    let intermediate = shell.config.intermediate_file();
    let downloader = Downloader {
        openssl: &openssl,
        intermediate: &intermediate,
    };

    if downloader.download(&mut shell.console, host, port, pem_file)? {
        Ok(Outcome::Ok(true))
    } else {
        Ok(Outcome::Info)
    }
}
