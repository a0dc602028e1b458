//! The active keystore and the keytool calls made against it.
//!
//! Every operation follows the same sequence: check that a store is open,
//! echo the keytool command line, collect the password, run keytool. The
//! password is appended after echoing so it never reaches the screen or the
//! log.
//!
//! Alias-scoped operations go through [`AliasRef`], a short-lived view of the
//! store fixed to one alias:
//!
//! ```no_run
//! # use keyshell::{Console, Keystore};
//! # fn demo(store: &mut Keystore, console: &mut Console) -> keyshell::Result<()> {
//! store.alias("mycert").rename(console, "oldcert")?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::console::Console;
use crate::credentials::PasswordHolder;
use crate::error::{KeyshellError, Result};
use crate::process::Invocation;

/// Handle to the keystore file the session is working on.
#[derive(Debug)]
pub struct Keystore {
    path: Option<PathBuf>,
    password: PasswordHolder,
    keytool: String,
    storetype: String,
}

impl Keystore {
    pub fn new(path: Option<PathBuf>, password: PasswordHolder, config: &Config) -> Self {
        Self {
            path,
            password,
            keytool: config.keytool(),
            storetype: config.storetype(),
        }
    }

    /// The open store, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Switch the session to another store file.
    pub fn set_path(&mut self, path: PathBuf) {
        info!("active keystore is now {}", path.display());
        self.path = Some(path);
    }

    pub fn password_mut(&mut self) -> &mut PasswordHolder {
        &mut self.password
    }

    /// A view of this store fixed to `alias`. An empty alias counts as none.
    pub fn alias<'a>(&'a mut self, alias: &'a str) -> AliasRef<'a> {
        AliasRef {
            store: self,
            alias: Some(alias).filter(|a| !a.is_empty()),
        }
    }

    /// Run `keytool <args> -keystore <path> [-alias <alias>] -storepass <password>`.
    fn execute(&mut self, console: &mut Console, alias: Option<&str>, args: &[&str]) -> Result<()> {
        let Some(path) = &self.path else {
            return Err(KeyshellError::NoStore);
        };

        let mut invocation = Invocation::new(&self.keytool)
            .args(args.iter().copied())
            .arg("-keystore")
            .arg(path.to_string_lossy());
        if let Some(alias) = alias {
            invocation = invocation.arg("-alias").arg(alias);
        }
        console.echo(&invocation.command_line())?;
        debug!("keytool: {}", invocation.command_line());

        let password_args = self.password.args(console.terminal())?;
        console.execute(&invocation.args(password_args))
    }

    /// List the entries in the store, with certificate details if `verbose`.
    pub fn list(&mut self, console: &mut Console, verbose: bool) -> Result<()> {
        if verbose {
            self.execute(console, None, &["-list", "-v"])
        } else {
            self.execute(console, None, &["-list"])
        }
    }

    /// Import the certificate in `file` under `alias`.
    pub fn import(&mut self, console: &mut Console, alias: &str, file: &str) -> Result<()> {
        self.alias(alias).import(console, file)
    }

    /// Remove `alias` from the store.
    pub fn delete(&mut self, console: &mut Console, alias: &str) -> Result<()> {
        self.alias(alias).delete(console)
    }

    /// Export the certificate under `alias` as PEM, to `file` or stdout.
    pub fn export(&mut self, console: &mut Console, alias: &str, file: Option<&str>) -> Result<()> {
        self.alias(alias).export(console, file)
    }

    /// Rename `alias` to `new_alias`.
    pub fn rename(&mut self, console: &mut Console, alias: &str, new_alias: &str) -> Result<()> {
        self.alias(alias).rename(console, new_alias)
    }
}

/// A keystore bound to one alias for the duration of a single command.
pub struct AliasRef<'a> {
    store: &'a mut Keystore,
    alias: Option<&'a str>,
}

impl AliasRef<'_> {
    pub fn alias(&self) -> Option<&str> {
        self.alias
    }

    fn require_alias(&self) -> Result<&str> {
        self.alias.ok_or(KeyshellError::AliasRequired)
    }

    fn execute(&mut self, console: &mut Console, args: &[&str]) -> Result<()> {
        self.store.execute(console, self.alias, args)
    }

    pub fn import(&mut self, console: &mut Console, file: &str) -> Result<()> {
        let storetype = self.store.storetype.clone();
        self.execute(console, &["-import", "-file", file, "-storetype", storetype.as_str()])
    }

    pub fn delete(&mut self, console: &mut Console) -> Result<()> {
        self.execute(console, &["-delete"])
    }

    pub fn rename(&mut self, console: &mut Console, new_alias: &str) -> Result<()> {
        self.require_alias()?;
        self.execute(console, &["-changealias", "-destalias", new_alias])
    }

    pub fn export(&mut self, console: &mut Console, file: Option<&str>) -> Result<()> {
        self.require_alias()?;
        match file {
            Some(file) => self.execute(console, &["-exportcert", "-rfc", "-file", file]),
            None => self.execute(console, &["-exportcert", "-rfc"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::RecordingRunner;
    use crate::terminal::{Line, ScriptedTerminal, Transcript};

    fn setup(
        path: Option<&str>,
        password: Option<&str>,
        term: ScriptedTerminal,
    ) -> (Keystore, Console, RecordingRunner, Transcript) {
        let runner = RecordingRunner::new();
        let transcript = term.transcript();
        let store = Keystore::new(
            path.map(PathBuf::from),
            PasswordHolder::new(password.map(String::from)),
            &Config::default(),
        );
        let console = Console::new(Box::new(term), Box::new(runner.clone()));
        (store, console, runner, transcript)
    }

    #[test]
    fn test_list_builds_keytool_call() {
        let (mut store, mut console, runner, transcript) =
            setup(Some("store.jks"), Some("changeit"), ScriptedTerminal::new());

        store.list(&mut console, true).unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "keytool");
        assert_eq!(
            calls[0].args,
            vec!["-list", "-v", "-keystore", "store.jks", "-storepass", "changeit"]
        );
        let text = transcript.text();
        assert!(text.contains("keytool -list -v -keystore store.jks"));
        assert!(!text.contains("changeit"));
    }

    #[test]
    fn test_no_store_never_runs() {
        let (mut store, mut console, runner, _) = setup(None, None, ScriptedTerminal::new());

        assert!(matches!(store.list(&mut console, false), Err(KeyshellError::NoStore)));
        assert!(matches!(store.delete(&mut console, "a"), Err(KeyshellError::NoStore)));
        assert!(matches!(
            store.import(&mut console, "a", "a.pem"),
            Err(KeyshellError::NoStore)
        ));
        assert!(matches!(
            store.export(&mut console, "a", None),
            Err(KeyshellError::NoStore)
        ));
        assert!(matches!(
            store.rename(&mut console, "a", "b"),
            Err(KeyshellError::NoStore)
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_alias_operations() {
        let (mut store, mut console, runner, _) =
            setup(Some("s.jks"), Some("pw"), ScriptedTerminal::new());

        store.import(&mut console, "bananas", "banana.pem").unwrap();
        store.delete(&mut console, "bananas").unwrap();
        store.rename(&mut console, "old", "new").unwrap();
        store.export(&mut console, "new", Some("new.pem")).unwrap();

        let args: Vec<Vec<String>> = runner.calls().into_iter().map(|c| c.args).collect();
        assert_eq!(
            args[0],
            vec![
                "-import", "-file", "banana.pem", "-storetype", "jks", "-keystore", "s.jks",
                "-alias", "bananas", "-storepass", "pw"
            ]
        );
        assert_eq!(
            args[1],
            vec!["-delete", "-keystore", "s.jks", "-alias", "bananas", "-storepass", "pw"]
        );
        assert_eq!(
            args[2],
            vec![
                "-changealias", "-destalias", "new", "-keystore", "s.jks", "-alias", "old",
                "-storepass", "pw"
            ]
        );
        assert_eq!(
            args[3],
            vec![
                "-exportcert", "-rfc", "-file", "new.pem", "-keystore", "s.jks", "-alias", "new",
                "-storepass", "pw"
            ]
        );
    }

    #[test]
    fn test_rename_and_export_require_alias() {
        let (mut store, mut console, runner, _) =
            setup(Some("s.jks"), Some("pw"), ScriptedTerminal::new());

        assert!(matches!(
            store.alias("").rename(&mut console, "b"),
            Err(KeyshellError::AliasRequired)
        ));
        assert!(matches!(
            store.alias("").export(&mut console, None),
            Err(KeyshellError::AliasRequired)
        ));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_cancelled_password_skips_keytool() {
        let (mut store, mut console, runner, transcript) = setup(
            Some("s.jks"),
            None,
            ScriptedTerminal::new().with_secret(Line::Interrupted),
        );

        assert!(matches!(store.list(&mut console, false), Err(KeyshellError::Cancelled)));
        assert!(runner.calls().is_empty());
        // The command line is echoed before the password is requested.
        assert!(transcript.text().contains("keytool -list"));
    }

    #[test]
    fn test_password_shared_across_alias_views() {
        let (mut store, mut console, runner, transcript) = setup(
            Some("s.jks"),
            None,
            ScriptedTerminal::new().with_secret(Line::text("pw")),
        );

        store.delete(&mut console, "a").unwrap();
        store.export(&mut console, "b", None).unwrap();

        assert_eq!(runner.calls().len(), 2);
        assert_eq!(
            transcript.text().matches("Enter keystore password: ").count(),
            1
        );
    }

    #[test]
    fn test_failed_keytool_reports_code() {
        let (mut store, mut console, runner, _) =
            setup(Some("s.jks"), Some("pw"), ScriptedTerminal::new());
        runner.push_code(1);

        assert!(matches!(
            store.list(&mut console, false),
            Err(KeyshellError::CommandFailed { code: 1 })
        ));
    }
}
