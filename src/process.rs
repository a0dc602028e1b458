//! External process execution.
//!
//! Every keytool and openssl call goes through a [`Runner`]. The shell uses
//! [`SystemRunner`]; [`RecordingRunner`] stands in for it when the shell is
//! driven without real tools.

use std::cell::RefCell;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::rc::Rc;

use tracing::debug;

use crate::error::{KeyshellError, Result};

/// Where a child process reads its standard input from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StdinSource {
    #[default]
    Inherit,
    /// Fixed text written to the child's stdin, which is then closed.
    Text(String),
    /// An existing file opened for reading.
    File(PathBuf),
}

/// Where a child process writes its standard output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StdoutSink {
    #[default]
    Inherit,
    /// A file created (or truncated) before the child starts.
    File(PathBuf),
}

/// A single external command line plus its stdio wiring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub stdin: StdinSource,
    pub stdout: StdoutSink,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdin: StdinSource::Inherit,
            stdout: StdoutSink::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, stdin: StdinSource) -> Self {
        self.stdin = stdin;
        self
    }

    pub fn stdout(mut self, stdout: StdoutSink) -> Self {
        self.stdout = stdout;
        self
    }

    /// The command line as a user could paste it into a shell.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quote one argument for display. Only empty arguments and arguments with
/// whitespace or quotes need it; everything else is shown as-is.
pub fn quote_arg(arg: &str) -> String {
    let needs_quoting =
        arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"' || c == '\'');
    if !needs_quoting {
        return arg.to_string();
    }
    match shlex::try_quote(arg) {
        Ok(quoted) => quoted.into_owned(),
        Err(_) => format!("{:?}", arg),
    }
}

/// Runs invocations and reports the child's exit code.
pub trait Runner {
    /// Run to completion. `Err` means the program could not be started;
    /// a started program always yields `Ok(code)`.
    fn run(&mut self, invocation: &Invocation) -> Result<i32>;
}

/// Runs invocations as real child processes, blocking until they exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);

        match &invocation.stdin {
            StdinSource::Inherit => {}
            StdinSource::Text(_) => {
                command.stdin(Stdio::piped());
            }
            StdinSource::File(path) => {
                command.stdin(Stdio::from(File::open(path)?));
            }
        }
        if let StdoutSink::File(path) = &invocation.stdout {
            command.stdout(Stdio::from(File::create(path)?));
        }

        debug!("spawning {}", invocation.program);
        let mut child = command
            .spawn()
            .map_err(|e| KeyshellError::spawn(&invocation.program, e))?;

        if let StdinSource::Text(text) = &invocation.stdin
            && let Some(mut stdin) = child.stdin.take()
        {
            // The child may exit before reading everything; that is not our failure.
            if let Err(e) = stdin.write_all(text.as_bytes()) {
                debug!("child closed stdin early: {}", e);
            }
        }

        let status = child.wait()?;
        let code = exit_code(status);
        debug!("{} exited with {}", invocation.program, code);
        Ok(code)
    }
}

/// Exit code of a finished child. Signal deaths map to the negated signal number.
fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }
    status.code().unwrap_or(-1)
}

/// Records invocations instead of running them.
///
/// Clones share the same log, so a caller can keep one handle while the
/// shell owns another. Exit codes are taken from a queue, defaulting to 0.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    calls: Rc<RefCell<Vec<Invocation>>>,
    codes: Rc<RefCell<Vec<i32>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the exit code for the next unanswered invocation.
    pub fn push_code(&self, code: i32) {
        self.codes.borrow_mut().push(code);
    }

    /// Everything run so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.borrow().clone()
    }
}

impl Runner for RecordingRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<i32> {
        self.calls.borrow_mut().push(invocation.clone());
        let mut codes = self.codes.borrow_mut();
        if codes.is_empty() {
            Ok(0)
        } else {
            Ok(codes.remove(0))
        }
    }
}
