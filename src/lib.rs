//! keyshell - an interactive shell for reviewing and editing Java key stores.
//!
//! The shell does no keystore parsing or cryptography of its own. It turns
//! short commands into `keytool` and `openssl` invocations:
//! - Listing, importing, deleting, renaming and exporting certificates
//! - Fetching a keystore into a local working copy and putting it back
//! - Downloading the certificate a TLS server presents
//!
//! # Example
//!
//! ```no_run
//! use keyshell::{Config, Console, Keystore, PasswordHolder, Shell};
//! use keyshell::process::SystemRunner;
//! use keyshell::terminal::ReadlineTerminal;
//!
//! fn main() -> keyshell::Result<()> {
//!     let config = Config::load()?;
//!     let store = Keystore::new(Some("certs.jks".into()), PasswordHolder::default(), &config);
//!     let console = Console::new(Box::new(ReadlineTerminal::new()?), Box::new(SystemRunner));
//!     Shell::new(store, console, config).run()
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod credentials;
pub mod download;
pub mod error;
pub mod keystore;
pub mod process;
pub mod shell;
pub mod terminal;
pub mod utils;

// Re-export commonly used types at the crate root
pub use commands::Outcome;
pub use config::Config;
pub use console::Console;
pub use credentials::PasswordHolder;
pub use error::{KeyshellError, Result};
pub use keystore::{AliasRef, Keystore};
pub use shell::{Shell, State};
