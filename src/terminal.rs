//! Line input and output for the interactive shell.
//!
//! [`ReadlineTerminal`] drives a real tty through rustyline, which reports
//! Ctrl-C and Ctrl-D as values instead of killing the process. That lets
//! both the command prompt and the password prompt treat them as
//! cancellation. [`ScriptedTerminal`] replays canned input and captures
//! output in memory.

use std::borrow::Cow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Write};
use std::rc::Rc;

use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::history::DefaultHistory;
use rustyline::{ColorMode, Editor};
use rustyline::{Completer, Helper, Hinter, Validator};

use crate::error::Result;

/// One read from the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Text(String),
    /// Ctrl-C.
    Interrupted,
    /// Ctrl-D or closed input.
    Eof,
}

impl Line {
    pub fn text(s: impl Into<String>) -> Self {
        Line::Text(s.into())
    }
}

pub trait Terminal {
    /// Read one line of visible input.
    fn read_line(&mut self, prompt: &str) -> Result<Line>;

    /// Read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<Line>;

    /// Record a command in the session history.
    fn remember(&mut self, _line: &str) {}

    /// Sink for everything the shell prints.
    fn output(&mut self) -> &mut dyn Write;
}

/// Hides typed characters while `masking` is set.
#[derive(Completer, Helper, Hinter, Validator)]
struct MaskingHelper {
    masking: bool,
}

impl Highlighter for MaskingHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.masking {
            Cow::Owned(" ".repeat(line.chars().count()))
        } else {
            Cow::Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize) -> bool {
        self.masking
    }
}

/// Interactive terminal with in-memory history.
pub struct ReadlineTerminal {
    editor: Editor<MaskingHelper, DefaultHistory>,
    stdout: io::Stdout,
}

impl ReadlineTerminal {
    pub fn new() -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(MaskingHelper { masking: false }));
        editor.set_auto_add_history(false);
        Ok(Self {
            editor,
            stdout: io::stdout(),
        })
    }

    fn set_masking(&mut self, masking: bool) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.masking = masking;
        }
        self.editor.set_color_mode(if masking {
            ColorMode::Forced
        } else {
            ColorMode::Enabled
        });
    }
}

fn to_line(result: std::result::Result<String, ReadlineError>) -> Result<Line> {
    match result {
        Ok(text) => Ok(Line::Text(text)),
        Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
        Err(ReadlineError::Eof) => Ok(Line::Eof),
        Err(e) => Err(e.into()),
    }
}

impl Terminal for ReadlineTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        self.stdout.flush()?;
        to_line(self.editor.readline(prompt))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Line> {
        self.stdout.flush()?;
        self.set_masking(true);
        let result = self.editor.readline(prompt);
        self.set_masking(false);
        to_line(result)
    }

    fn remember(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.stdout
    }
}

/// Captured output of a [`ScriptedTerminal`]. Clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Rc<RefCell<Vec<u8>>>);

impl Transcript {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for Transcript {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Replays queued input. Prompts are written to the transcript the way a
/// tty would show them; an exhausted queue reads as end-of-input.
#[derive(Debug, Default)]
pub struct ScriptedTerminal {
    lines: VecDeque<Line>,
    secrets: VecDeque<Line>,
    history: Vec<String>,
    transcript: Transcript,
}

impl ScriptedTerminal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue input for visible prompts (commands and confirmations).
    pub fn with_lines<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(|s| Line::Text(s.into())));
        self
    }

    /// Queue a raw read result, such as an interrupt, for a visible prompt.
    pub fn with_line(mut self, line: Line) -> Self {
        self.lines.push_back(line);
        self
    }

    /// Queue a read result for the next hidden prompt.
    pub fn with_secret(mut self, secret: Line) -> Self {
        self.secrets.push_back(secret);
        self
    }

    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Terminal for ScriptedTerminal {
    fn read_line(&mut self, prompt: &str) -> Result<Line> {
        write!(self.transcript, "{}", prompt)?;
        Ok(self.lines.pop_front().unwrap_or(Line::Eof))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<Line> {
        write!(self.transcript, "{}", prompt)?;
        Ok(self.secrets.pop_front().unwrap_or(Line::Eof))
    }

    fn remember(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn output(&mut self) -> &mut dyn Write {
        &mut self.transcript
    }
}
