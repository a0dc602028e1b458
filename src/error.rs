//! Unified error type for keyshell.
//!
//! Store operations and command handlers return `Result<T, KeyshellError>`.
//! The shell turns each variant into the message the user sees, so the
//! variants map one-to-one onto the failure kinds a session can hit.

use std::fmt;
use std::path::PathBuf;

/// The unified error type for all keyshell operations.
#[derive(Debug)]
pub enum KeyshellError {
    // ── I/O & filesystem ───────────────────────────────────────────────
    /// Filesystem or terminal I/O failed.
    Io(std::io::Error),

    /// Copying a keystore file failed.
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    /// KDL config file could not be read or decoded.
    Config(String),

    // ── Store state ────────────────────────────────────────────────────
    /// An operation needs a keystore but none has been opened or fetched.
    NoStore,

    /// An alias-scoped operation was invoked without an alias.
    AliasRequired,

    // ── External tools ─────────────────────────────────────────────────
    /// The external tool ran but exited with a non-zero status.
    CommandFailed { code: i32 },

    /// The external tool could not be started at all.
    Spawn {
        program: String,
        source: std::io::Error,
    },

    // ── User interaction ───────────────────────────────────────────────
    /// The user aborted a password or confirmation prompt.
    Cancelled,

    /// User input validation failed.
    Validation(String),

    // ── Catch-all ──────────────────────────────────────────────────────
    Other(String),
}

// ── Display ────────────────────────────────────────────────────────────

impl fmt::Display for KeyshellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyshellError::Io(e) => write!(f, "{}", e),
            KeyshellError::Copy { from, to, .. } => {
                write!(f, "cannot copy '{}' to '{}'", from.display(), to.display())
            }
            KeyshellError::Config(msg) => write!(f, "config error: {}", msg),
            KeyshellError::NoStore => write!(f, "No keystore is selected."),
            KeyshellError::AliasRequired => write!(f, "Need an alias for this command."),
            KeyshellError::CommandFailed { code } => {
                write!(f, "Command finished with return code {}", code)
            }
            KeyshellError::Spawn { program, source } => {
                write!(f, "Could not run {}: {}", program, source)
            }
            KeyshellError::Cancelled => write!(f, "Cancelled."),
            KeyshellError::Validation(msg) => write!(f, "{}", msg),
            KeyshellError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for KeyshellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            KeyshellError::Io(e) => Some(e),
            KeyshellError::Copy { source, .. } => Some(source),
            KeyshellError::Spawn { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ── From implementations for common error types ────────────────────────

impl From<std::io::Error> for KeyshellError {
    fn from(e: std::io::Error) -> Self {
        KeyshellError::Io(e)
    }
}

impl From<rustyline::error::ReadlineError> for KeyshellError {
    fn from(e: rustyline::error::ReadlineError) -> Self {
        match e {
            rustyline::error::ReadlineError::Io(e) => KeyshellError::Io(e),
            other => KeyshellError::Other(other.to_string()),
        }
    }
}

impl From<String> for KeyshellError {
    fn from(s: String) -> Self {
        KeyshellError::Other(s)
    }
}

impl From<&str> for KeyshellError {
    fn from(s: &str) -> Self {
        KeyshellError::Other(s.to_string())
    }
}

// ── Convenience constructors ───────────────────────────────────────────

impl KeyshellError {
    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        KeyshellError::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        KeyshellError::Validation(message.into())
    }

    /// Wrap a failure to start an external program.
    pub fn spawn(program: impl Into<String>, source: std::io::Error) -> Self {
        KeyshellError::Spawn {
            program: program.into(),
            source,
        }
    }

    /// True for failures reported in red (the external tool misbehaved).
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            KeyshellError::CommandFailed { .. } | KeyshellError::Spawn { .. }
        )
    }
}

/// Convenience type alias for Results using KeyshellError.
pub type Result<T> = std::result::Result<T, KeyshellError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_shell_output() {
        assert_eq!(KeyshellError::NoStore.to_string(), "No keystore is selected.");
        assert_eq!(KeyshellError::Cancelled.to_string(), "Cancelled.");
        assert_eq!(
            KeyshellError::CommandFailed { code: 2 }.to_string(),
            "Command finished with return code 2"
        );
    }

    #[test]
    fn test_tool_failure_classification() {
        assert!(KeyshellError::CommandFailed { code: 1 }.is_tool_failure());
        let missing = std::io::Error::new(std::io::ErrorKind::NotFound, "not found");
        assert!(KeyshellError::spawn("keytool", missing).is_tool_failure());
        assert!(!KeyshellError::Cancelled.is_tool_failure());
        assert!(!KeyshellError::NoStore.is_tool_failure());
    }
}
