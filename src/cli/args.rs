//! CLI argument parsing structures.

use clap::{Args, Parser};
use std::path::PathBuf;

use crate::config::{Config, expand_tilde};
use crate::error::Result;

const EXAMPLES: &str = "\
Examples:
  Fetching a keystore:
    $ keyshell
    no keystore > fetch /path/to/store.jks
    _store.jks > ls

  Opening an existing local keystore:
    $ keyshell mykeystore.jks
    mykeystore.jks > ls

  Creating a new keystore:
    $ keyshell newkeystore.jks
    newkeystore.jks > add bananas banana.pem
    newkeystore.jks > quit

Inside the shell, type \"help\" for the list of commands.";

/// Main CLI structure for keyshell.
#[derive(Parser, Debug)]
#[command(name = "keyshell", version)]
#[command(about = "Interactive shell for reviewing Java key stores", long_about = None)]
#[command(after_help = EXAMPLES)]
pub struct Cli {
    /// Keystore file to open
    pub store: Option<PathBuf>,

    /// Keystore password (asked for on first use if omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    #[command(flatten)]
    pub config: ConfigArgs,
}

/// Settings that override keyshell.kdl.
#[derive(Debug, Default, Args)]
pub struct ConfigArgs {
    /// Config file to use instead of searching for keyshell.kdl
    #[arg(long = "config", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    /// keytool program to run
    #[arg(long, value_name = "PROGRAM")]
    pub keytool: Option<String>,

    /// openssl program to run
    #[arg(long, value_name = "PROGRAM")]
    pub openssl: Option<String>,
}

impl ConfigArgs {
    /// Load the config file and apply the command-line overrides on top.
    pub fn load(&self) -> Result<Config> {
        let mut config = match &self.config_file {
            Some(path) => Config::load_from_path(&expand_tilde(&path.to_string_lossy()))?,
            None => Config::load()?,
        };
        if let Some(keytool) = &self.keytool {
            config.set_keytool(keytool);
        }
        if let Some(openssl) = &self.openssl {
            config.set_openssl(openssl);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_store_and_password() {
        let cli = Cli::try_parse_from(["keyshell", "certs.jks", "-p", "changeit"]).unwrap();
        assert_eq!(cli.store, Some(PathBuf::from("certs.jks")));
        assert_eq!(cli.password.as_deref(), Some("changeit"));

        let cli = Cli::try_parse_from(["keyshell", "--password", "pw"]).unwrap();
        assert!(cli.store.is_none());
        assert_eq!(cli.password.as_deref(), Some("pw"));
    }

    #[test]
    fn test_tool_overrides() {
        let cli = Cli::try_parse_from([
            "keyshell",
            "--keytool",
            "/opt/jdk/bin/keytool",
            "--openssl",
            "libressl",
        ])
        .unwrap();
        assert_eq!(cli.config.keytool.as_deref(), Some("/opt/jdk/bin/keytool"));
        assert_eq!(cli.config.openssl.as_deref(), Some("libressl"));
    }
}
