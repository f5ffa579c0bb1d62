//! mysh - Interactive line-oriented shell for local filesystem operations
//!
//! This crate provides:
//! - A read-eval loop with configurable prompt and line-continuation symbols
//! - A name-ordered registry of built-in commands
//! - Built-in commands (ls, tree, cat, hexdump, copy, ...) on the local filesystem
//! - Console backends for line editing, plain stdio and captured test output

pub mod builtins;
pub mod console;
pub mod error;
pub mod registry;
pub mod repl;
pub mod shell;

pub use console::{CapturedOutput, Console, EditorConsole, StdConsole};
pub use error::{ShellError, ShellResult};
pub use registry::{Command, CommandFn, Registry};
pub use repl::{run, Termination};
pub use shell::{Environment, ShellStatus, Symbol};
