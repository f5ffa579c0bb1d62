//! Command records and the name-ordered registry

use std::collections::BTreeMap;

use crate::error::ShellResult;
use crate::shell::{Environment, ShellStatus};

/// Handler signature shared by every command.
///
/// The argument is the remainder of the logical line after the command name,
/// with double quotes removed, or `None` when nothing followed the name.
pub type CommandFn = fn(&mut Environment, Option<&str>) -> ShellResult<ShellStatus>;

#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub summary: &'static str,
    pub details: &'static [&'static str],
    pub execute: CommandFn,
}

impl Command {
    /// Summary followed by the detail lines.
    pub fn description(&self) -> impl Iterator<Item = &'static str> {
        let details: &'static [&'static str] = self.details;
        std::iter::once(self.summary).chain(details.iter().copied())
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<&'static str, Command>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in command.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for command in crate::builtins::BUILTINS {
            registry.register(*command);
        }
        registry
    }

    /// Add a command. A later registration replaces an earlier one with the
    /// same name.
    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name, command);
    }

    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
