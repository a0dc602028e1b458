//! Command handlers for the keyshell prompt.
//!
//! Each handler receives the shell and the arguments typed after the
//! command name, and reports back with an [`Outcome`]. Errors returned by a
//! handler are reported by the shell.

mod add;
mod delete;
mod download;
mod export;
mod list;
mod rename;
mod session;
mod transfer;

pub use add::handle_add;
pub use delete::handle_delete;
pub use download::handle_download;
pub use export::handle_export;
pub use list::{handle_ll, handle_ls};
pub use rename::handle_rename;
pub use session::{handle_help, handle_password, handle_quit};
pub use transfer::{handle_fetch, handle_put};

/// What a command handler tells the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran; `false` means it failed.
    Ok(bool),
    /// Nothing to report (help text, a declined overwrite).
    Info,
    /// The user aborted a prompt.
    Cancelled,
    /// Wrong arguments; the shell prints the command's usage line.
    BadUsage,
    /// Leave the shell.
    Exit,
}
