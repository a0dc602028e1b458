//! The interactive prompt.
//!
//! Each turn renders `<store> > `, reads a line, splits it with shell
//! quoting rules and hands the words to the matching command. Ctrl-D or a
//! quit command ends the session; Ctrl-C only abandons the current line.

mod registry;

pub use registry::{Command, Handler, Registry};

use std::io::Write;

use tracing::{debug, warn};

use crate::commands::Outcome;
use crate::config::Config;
use crate::console::Console;
use crate::error::{KeyshellError, Result};
use crate::keystore::Keystore;
use crate::terminal::Line;

/// Whether the prompt loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Exit,
}

pub struct Shell {
    pub(crate) store: Keystore,
    pub(crate) console: Console,
    pub(crate) config: Config,
    registry: &'static Registry,
}

impl Shell {
    pub fn new(store: Keystore, console: Console, config: Config) -> Self {
        Self {
            store,
            console,
            config,
            registry: Registry::builtin(),
        }
    }

    pub fn store(&self) -> &Keystore {
        &self.store
    }

    pub fn registry(&self) -> &'static Registry {
        self.registry
    }

    /// `<store path> > `, or `no keystore > ` before one is opened.
    pub fn prompt(&self) -> String {
        let location = self
            .store
            .path()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no keystore".to_string());
        format!("{} > ", location)
    }

    fn suggest_help(&mut self) -> Result<()> {
        writeln!(self.console.out(), "Type \"help\" for instructions.")?;
        Ok(())
    }

    /// Greet the user and serve prompts until the session ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.console.out())?;
        self.suggest_help()?;
        while self.step()? == State::Running {}
        Ok(())
    }

    /// Read and handle a single line.
    pub fn step(&mut self) -> Result<State> {
        let prompt = self.prompt();
        let line = match self.console.terminal().read_line(&prompt)? {
            Line::Text(text) => text,
            Line::Interrupted => {
                writeln!(self.console.out(), " ^C\n(Use \"quit\" or ^D to quit.)")?;
                return Ok(State::Running);
            }
            Line::Eof => {
                writeln!(self.console.out())?;
                return Ok(State::Exit);
            }
        };
        writeln!(self.console.out())?;

        let line = line.trim();
        if line.is_empty() {
            self.suggest_help()?;
            return Ok(State::Running);
        }
        self.console.terminal().remember(line);

        match self.execute_line(line)? {
            Outcome::Exit => Ok(State::Exit),
            _ => Ok(State::Running),
        }
    }

    /// Split `line` into words and run it as a command.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        let Some(words) = shlex::split(line) else {
            let err = KeyshellError::validation("Could not parse command: unbalanced quotes.");
            return self.report(err);
        };
        match words.split_first() {
            Some((name, args)) => self.dispatch(name, args),
            None => {
                self.suggest_help()?;
                Ok(Outcome::Info)
            }
        }
    }

    /// Run the command registered as `name`.
    pub fn dispatch(&mut self, name: &str, args: &[String]) -> Result<Outcome> {
        let registry = self.registry;
        let Some(command) = registry.lookup(name) else {
            writeln!(self.console.out(), "Command not recognised.")?;
            self.suggest_help()?;
            return Ok(Outcome::Info);
        };

        let outcome = match (command.handler)(self, args) {
            Ok(outcome) => outcome,
            Err(err) => self.report(err)?,
        };
        debug!("{} -> {:?}", name, outcome);

        if outcome == Outcome::BadUsage {
            writeln!(self.console.out(), "Usage: {}", command.usage)?;
        }
        Ok(outcome)
    }

    /// Tell the user how a command failed.
    ///
    /// Only errors writing to the terminal escape from here.
    fn report(&mut self, err: KeyshellError) -> Result<Outcome> {
        match &err {
            KeyshellError::Cancelled => {
                writeln!(self.console.out(), "{}", err)?;
                return Ok(Outcome::Cancelled);
            }
            KeyshellError::NoStore
            | KeyshellError::AliasRequired
            | KeyshellError::Validation(_) => {
                writeln!(self.console.out(), "{}", err)?;
            }
            err if err.is_tool_failure() => {
                self.console.alert(&err.to_string())?;
            }
            _ => {
                warn!("command failed: {}", err);
                let out = self.console.out();
                writeln!(out, "Error: {}", err)?;
                let mut source = std::error::Error::source(&err);
                while let Some(cause) = source {
                    writeln!(out, "  caused by: {}", cause)?;
                    source = cause.source();
                }
                self.console.alert("Command failed")?;
            }
        }
        Ok(Outcome::Ok(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::PasswordHolder;
    use crate::process::RecordingRunner;
    use crate::terminal::{ScriptedTerminal, Transcript};
    use std::path::PathBuf;

    fn shell(store: Option<&str>, term: ScriptedTerminal) -> (Shell, RecordingRunner, Transcript) {
        let runner = RecordingRunner::new();
        let transcript = term.transcript();
        let config = Config::default();
        let store = Keystore::new(
            store.map(PathBuf::from),
            PasswordHolder::new(Some("changeit".into())),
            &config,
        );
        let console = Console::new(Box::new(term), Box::new(runner.clone()));
        (Shell::new(store, console, config), runner, transcript)
    }

    #[test]
    fn test_prompt_shows_store() {
        let (sh, _, _) = shell(None, ScriptedTerminal::new());
        assert_eq!(sh.prompt(), "no keystore > ");

        let (sh, _, _) = shell(Some("certs.jks"), ScriptedTerminal::new());
        assert_eq!(sh.prompt(), "certs.jks > ");
    }

    #[test]
    fn test_eof_exits_with_newline() {
        let (mut sh, _, transcript) = shell(None, ScriptedTerminal::new());
        assert_eq!(sh.step().unwrap(), State::Exit);
        assert_eq!(transcript.text(), "no keystore > \n");
    }

    #[test]
    fn test_interrupt_keeps_running() {
        let (mut sh, _, transcript) =
            shell(None, ScriptedTerminal::new().with_line(Line::Interrupted));
        assert_eq!(sh.step().unwrap(), State::Running);
        assert!(transcript.text().contains(" ^C\n(Use \"quit\" or ^D to quit.)"));
    }

    #[test]
    fn test_empty_line_suggests_help() {
        let (mut sh, runner, transcript) = shell(None, ScriptedTerminal::new().with_lines(["   "]));
        assert_eq!(sh.step().unwrap(), State::Running);
        assert_eq!(
            transcript.text(),
            "no keystore > \nType \"help\" for instructions.\n"
        );
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_unknown_command() {
        let (mut sh, _, transcript) = shell(None, ScriptedTerminal::new());
        assert_eq!(sh.execute_line("frobnicate").unwrap(), Outcome::Info);
        let text = transcript.text();
        assert!(text.contains("Command not recognised."));
        assert!(text.contains("Type \"help\" for instructions."));
    }

    #[test]
    fn test_quoted_arguments_stay_together() {
        let (mut sh, runner, _) = shell(Some("s.jks"), ScriptedTerminal::new());
        assert_eq!(
            sh.execute_line(r#"add "my cert" 'a b.pem'"#).unwrap(),
            Outcome::Ok(true)
        );
        let args = &runner.calls()[0].args;
        assert_eq!(args[2], "a b.pem");
        assert!(args.contains(&"my cert".to_string()));
    }

    #[test]
    fn test_unbalanced_quotes_reported() {
        let (mut sh, runner, transcript) = shell(Some("s.jks"), ScriptedTerminal::new());
        assert_eq!(sh.execute_line("rm \"oops").unwrap(), Outcome::Ok(false));
        assert!(transcript.text().contains("unbalanced quotes"));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn test_tool_failure_is_red_and_not_fatal() {
        let (mut sh, runner, transcript) = shell(Some("s.jks"), ScriptedTerminal::new());
        runner.push_code(1);
        assert_eq!(sh.execute_line("ls").unwrap(), Outcome::Ok(false));
        let text = transcript.text();
        assert!(text.contains("Command finished with return code 1"));
        assert!(text.contains("\u{1b}[91m"));
    }

    #[test]
    fn test_command_names_ignore_case() {
        let (mut sh, runner, _) = shell(Some("s.jks"), ScriptedTerminal::new());
        assert_eq!(sh.execute_line("LL").unwrap(), Outcome::Ok(true));
        assert_eq!(runner.calls()[0].args[..2], ["-list", "-v"]);
    }
}
