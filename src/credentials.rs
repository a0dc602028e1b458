//! Keystore password handling.
//!
//! ## Session caching
//!
//! The password is asked for at most once per session: the first store
//! operation that needs it prompts, and every later keytool call reuses the
//! cached value. The `password` command replaces the cached value, and a
//! cancelled replacement clears it so the next operation prompts again.
//!
//! An empty entry is never cached. It still counts as an answer for the
//! call that prompted, which is different from cancelling.

use std::io::Write;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::error::{KeyshellError, Result};
use crate::terminal::{Line, Terminal};

const PASSWORD_PROMPT: &str = "Enter keystore password: ";

/// Prompt for a keystore password with hidden input.
///
/// Returns `Ok(None)` when the user presses Ctrl-C or Ctrl-D.
pub fn prompt_password(terminal: &mut dyn Terminal) -> Result<Option<SecretString>> {
    match terminal.read_secret(PASSWORD_PROMPT)? {
        Line::Text(password) => Ok(Some(SecretString::from(password))),
        Line::Interrupted => {
            writeln!(terminal.output(), "^C")?;
            Ok(None)
        }
        Line::Eof => {
            writeln!(terminal.output(), "^D")?;
            Ok(None)
        }
    }
}

/// Caches the keystore password for the lifetime of the session.
#[derive(Default)]
pub struct PasswordHolder {
    password: Option<SecretString>,
}

impl PasswordHolder {
    pub fn new(password: Option<String>) -> Self {
        let mut holder = Self::default();
        holder.set(password.map(SecretString::from));
        holder
    }

    pub fn is_set(&self) -> bool {
        self.password.is_some()
    }

    /// Replace the cached password. `None` (or an empty password) forces
    /// the next [`args`](Self::args) call to prompt.
    pub fn set(&mut self, password: Option<SecretString>) {
        self.password = password.filter(|p| !p.expose_secret().is_empty());
    }

    /// Arguments that authenticate a keytool call, prompting if nothing is
    /// cached yet. Fails with [`KeyshellError::Cancelled`] if the prompt is
    /// aborted.
    pub fn args(&mut self, terminal: &mut dyn Terminal) -> Result<Vec<String>> {
        let password = match &self.password {
            Some(password) => password.expose_secret().to_string(),
            None => {
                let entered = prompt_password(terminal)?.ok_or(KeyshellError::Cancelled)?;
                let password = entered.expose_secret().to_string();
                self.set(Some(entered));
                debug!("keystore password entered (cached: {})", self.is_set());
                password
            }
        };
        Ok(vec!["-storepass".to_string(), password])
    }
}

impl std::fmt::Debug for PasswordHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHolder")
            .field("set", &self.is_set())
            .finish()
    }
}
