//! Built-in commands

use crate::error::ShellResult;
use crate::registry::Command;
use crate::shell::{Environment, ShellStatus};

mod builtins_fs;
mod builtins_shell;
mod builtins_text;
pub mod local_fs;
pub mod utils;

/// Buffer size for streaming file content.
pub(crate) const STREAM_CHUNK_SIZE: usize = 4 * 1024;

pub const BUILTINS: &[Command] = &[
    Command {
        name: "cat",
        summary: "Writes the content of a file to the console.",
        details: &[
            "cat PATH [CHARSET]",
            "PATH must be an existing file.",
            "CHARSET decodes the file bytes; the session default is used when omitted.",
            "Run 'charsets' to list the available charset names.",
        ],
        execute: builtins_text::cmd_cat,
    },
    Command {
        name: "charsets",
        summary: "Lists the names of the supported charsets.",
        details: &["charsets", "Takes no arguments. One charset name is written per line."],
        execute: builtins_text::cmd_charsets,
    },
    Command {
        name: "copy",
        summary: "Copies a file.",
        details: &[
            "copy SOURCE DEST",
            "SOURCE must be an existing file.",
            "If DEST is a directory, SOURCE is copied into it under its own name.",
            "If the target file already exists you are asked before it is overwritten.",
        ],
        execute: builtins_fs::cmd_copy,
    },
    Command {
        name: "exit",
        summary: "Exits the shell.",
        details: &["exit"],
        execute: builtins_shell::cmd_exit,
    },
    Command {
        name: "help",
        summary: "Shows information about the commands.",
        details: &[
            "help          lists every command with a short description.",
            "help COMMAND  shows the full description of COMMAND.",
        ],
        execute: builtins_shell::cmd_help,
    },
    Command {
        name: "hexdump",
        summary: "Writes a hexadecimal view of a file.",
        details: &[
            "hexdump PATH",
            "PATH must be an existing file.",
            "Each line shows 16 bytes in hex followed by their printable characters;",
            "bytes outside 32-126 are shown as '.'.",
        ],
        execute: builtins_text::cmd_hexdump,
    },
    Command {
        name: "ls",
        summary: "Lists a directory (not recursively).",
        details: &[
            "ls PATH",
            "PATH must be an existing directory. Each entry is written in four columns:",
            "  1: d if directory, r if readable, w if writable, x if executable (- otherwise)",
            "  2: size in bytes; directories show the total size of every file below them",
            "  3: creation date and time",
            "  4: name",
        ],
        execute: builtins_fs::cmd_ls,
    },
    Command {
        name: "mkdir",
        summary: "Creates a directory.",
        details: &["mkdir PATH", "Missing parent directories are created as well."],
        execute: builtins_fs::cmd_mkdir,
    },
    Command {
        name: "symbol",
        summary: "Shows or changes a shell symbol.",
        details: &[
            "symbol NAME           shows the current character for NAME.",
            "symbol NAME NEWCHAR   sets NAME to the first character of NEWCHAR.",
            "NAME is one of PROMPT, MULTILINE or MORELINE (case-insensitive).",
        ],
        execute: builtins_shell::cmd_symbol,
    },
    Command {
        name: "tree",
        summary: "Prints a directory tree.",
        details: &[
            "tree PATH",
            "PATH must be an existing directory. Each level is indented by two more spaces.",
        ],
        execute: builtins_fs::cmd_tree,
    },
];

/// Whitespace-separated arguments; empty when none were given.
pub(crate) fn split_args(args: Option<&str>) -> Vec<&str> {
    args.map(|a| a.split_whitespace().collect())
        .unwrap_or_default()
}

/// The whole remainder as a single path, so names with spaces survive.
pub(crate) fn path_arg(args: Option<&str>) -> Option<&str> {
    args.map(str::trim).filter(|a| !a.is_empty())
}

/// Write `message` plus the pointer to the command's help page.
pub(crate) fn usage_error(env: &mut Environment, name: &str, message: &str) -> ShellResult<ShellStatus> {
    env.writeln(message)?;
    env.writeln(&format!("See help {name} for more info."))?;
    Ok(ShellStatus::Continue)
}

/// Report a file-level failure and keep the session going.
pub(crate) fn io_failure(
    env: &mut Environment,
    name: &str,
    err: &std::io::Error,
) -> ShellResult<ShellStatus> {
    tracing::debug!("{}: {}", name, err);
    env.writeln(&format!("An I/O error occurred: {err}"))?;
    Ok(ShellStatus::Continue)
}
