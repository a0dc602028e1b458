//! The table of commands the prompt understands.
//!
//! Built once, before the first prompt, and read-only afterwards. Several
//! names can lead to the same entry (`rm` and `delete`); help lists each
//! entry once, at the position of the first name that leads to it. A name
//! registered again keeps its place and points at the newer entry.

use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::debug;

use super::Shell;
use crate::commands::{self, Outcome};
use crate::error::Result;

/// Signature shared by every command handler.
pub type Handler = fn(&mut Shell, &[String]) -> Result<Outcome>;

/// One registered command.
#[derive(Debug)]
pub struct Command {
    pub usage: &'static str,
    pub handler: Handler,
}

#[derive(Debug, Default)]
pub struct Registry {
    commands: Vec<Command>,
    by_name: HashMap<&'static str, usize>,
    /// Names in the order they were first registered.
    names: Vec<&'static str>,
}

static BUILTIN: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::new();
    registry
        .register(
            &["fetch"],
            "fetch path/to/store.jks : fetch a key store",
            commands::handle_fetch,
        )
        .register(
            &["put"],
            "put path/to/store.jks : copy out a key store",
            commands::handle_put,
        )
        .register(
            &["ls"],
            "ls [-l] : list contents [verbosely]",
            commands::handle_ls,
        )
        .register(&["ll"], "ll : alias for ls -l", commands::handle_ll)
        .register(
            &["x", "export"],
            "export / x ALIAS [FILE] : export alias [to file]",
            commands::handle_export,
        )
        .register(
            &["rm", "delete"],
            "delete / rm ALIAS : delete an alias",
            commands::handle_delete,
        )
        .register(
            &["add"],
            "add ALIAS FILE : import an alias from a file",
            commands::handle_add,
        )
        .register(
            &["rename"],
            "rename OLD_ALIAS NEW_ALIAS : rename an existing alias",
            commands::handle_rename,
        )
        .register(
            &["password"],
            "password : prompt for a new keytool password",
            commands::handle_password,
        )
        .register(
            &["download", "dl"],
            "download / dl HOST PORT [FILE] : download certificate [to file]",
            commands::handle_download,
        )
        .register(&["h", "help"], "help / h : show help", commands::handle_help)
        .register(
            &["q", "quit", "^d"],
            "quit / q : exit program",
            commands::handle_quit,
        );
    registry
});

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The commands available at the keyshell prompt.
    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    /// Register `handler` under every name in `names`. A name registered
    /// again later points at the newer entry.
    pub fn register(
        &mut self,
        names: &[&'static str],
        usage: &'static str,
        handler: Handler,
    ) -> &mut Self {
        let index = self.commands.len();
        self.commands.push(Command { usage, handler });
        for name in names {
            if self.by_name.insert(*name, index).is_none() {
                self.names.push(*name);
            }
        }
        self
    }

    /// Find a command by name, ignoring case.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        let found = self
            .by_name
            .get(name.to_lowercase().as_str())
            .map(|&index| &self.commands[index]);
        debug!("lookup {:?}: {}", name, found.is_some());
        found
    }

    /// Each reachable command once, ordered by the first name leading to it.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        let mut seen = Vec::new();
        self.names
            .iter()
            .filter_map(|name| self.by_name.get(name).copied())
            .filter(move |index| {
                if seen.contains(index) {
                    false
                } else {
                    seen.push(*index);
                    true
                }
            })
            .map(|index| &self.commands[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let registry = Registry::builtin();
        let ls = registry.lookup("LS").unwrap();
        assert_eq!(ls.usage, "ls [-l] : list contents [verbosely]");
        assert!(registry.lookup("Quit").is_some());
        assert!(registry.lookup("^D").is_some());
        assert!(registry.lookup("frobnicate").is_none());
    }

    #[test]
    fn test_aliases_share_an_entry() {
        let registry = Registry::builtin();
        let rm = registry.lookup("rm").unwrap();
        let delete = registry.lookup("delete").unwrap();
        assert!(std::ptr::eq(rm, delete));
        assert!(std::ptr::eq(
            registry.lookup("x").unwrap(),
            registry.lookup("export").unwrap()
        ));
    }

    #[test]
    fn test_commands_listed_once_in_order() {
        let usages: Vec<_> = Registry::builtin().commands().map(|c| c.usage).collect();
        assert_eq!(usages.len(), 12);
        assert!(usages[0].starts_with("fetch "));
        assert!(usages[5].starts_with("delete / rm "));
        assert!(usages[11].starts_with("quit / q "));
    }

    #[test]
    fn test_reregistered_name_keeps_its_position() {
        let mut registry = Registry::new();
        registry
            .register(&["a"], "a : first", commands::handle_quit)
            .register(&["b"], "b : second", commands::handle_help)
            .register(&["a"], "a : replacement", commands::handle_ll);

        let usages: Vec<_> = registry.commands().map(|c| c.usage).collect();
        assert_eq!(usages, vec!["a : replacement", "b : second"]);
        assert_eq!(registry.lookup("a").unwrap().usage, "a : replacement");
    }

    #[test]
    fn test_partially_shadowed_entry_stays_listed() {
        let mut registry = Registry::new();
        registry
            .register(&["x", "export"], "export / x : first", commands::handle_export)
            .register(&["x"], "x : other", commands::handle_ls);

        let usages: Vec<_> = registry.commands().map(|c| c.usage).collect();
        assert_eq!(usages, vec!["x : other", "export / x : first"]);
    }
}
