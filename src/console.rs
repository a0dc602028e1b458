//! The shell's view of the outside world: a terminal to talk to the user
//! through and a runner for external tools.

use std::io::Write;
use std::path::Path;

use nu_ansi_term::Color;
use tracing::debug;

use crate::error::{KeyshellError, Result};
use crate::process::{Invocation, Runner};
use crate::terminal::{Line, Terminal};

pub struct Console {
    terminal: Box<dyn Terminal>,
    runner: Box<dyn Runner>,
}

impl Console {
    pub fn new(terminal: Box<dyn Terminal>, runner: Box<dyn Runner>) -> Self {
        Self { terminal, runner }
    }

    pub fn terminal(&mut self) -> &mut dyn Terminal {
        self.terminal.as_mut()
    }

    pub fn out(&mut self) -> &mut dyn Write {
        self.terminal.output()
    }

    /// Print an operation before it happens, in green.
    pub fn echo(&mut self, text: &str) -> Result<()> {
        writeln!(self.out(), "{}", Color::LightGreen.paint(text))?;
        Ok(())
    }

    /// Print a failure, in red.
    pub fn alert(&mut self, text: &str) -> Result<()> {
        writeln!(self.out(), "{}", Color::LightRed.paint(text))?;
        Ok(())
    }

    /// Run an invocation whose command line has already been echoed.
    /// A non-zero exit becomes [`KeyshellError::CommandFailed`].
    pub fn execute(&mut self, invocation: &Invocation) -> Result<()> {
        let code = self.runner.run(invocation)?;
        if code != 0 {
            debug!("{} failed with {}", invocation.program, code);
            return Err(KeyshellError::CommandFailed { code });
        }
        Ok(())
    }

    /// Ask a yes/no question until the answer is one or the other.
    /// Ctrl-C or end-of-input cancels.
    pub fn confirm(&mut self, message: &str) -> Result<bool> {
        writeln!(self.out(), "{}", message)?;
        loop {
            let answer = match self.terminal.read_line(">> ")? {
                Line::Text(text) => text.trim().to_lowercase(),
                Line::Interrupted | Line::Eof => {
                    writeln!(self.out())?;
                    return Err(KeyshellError::Cancelled);
                }
            };
            match answer.as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => writeln!(self.out(), "Please enter y or n.")?,
            }
        }
    }

    /// True if `path` is free or the user agrees to replace it.
    pub fn confirm_overwrite(&mut self, path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(true);
        }
        writeln!(self.out(), "File exists: '{}'", path.display())?;
        self.confirm("Overwrite?")
    }
}
