//! The read-eval loop

use crate::error::{ShellError, ShellResult};
use crate::shell::{Environment, ShellStatus};

/// Why a session ended.
#[derive(Debug)]
pub enum Termination {
    /// A command returned [`ShellStatus::Terminate`].
    Exit,
    /// The console ran out of input.
    EndOfInput,
    /// The console could not be read or written.
    ConsoleFailure(ShellError),
}

impl Termination {
    /// Process exit status for this cause.
    pub fn exit_code(&self) -> i32 {
        match self {
            Termination::Exit | Termination::EndOfInput => 0,
            Termination::ConsoleFailure(_) => 1,
        }
    }
}

impl From<ShellError> for Termination {
    fn from(err: ShellError) -> Self {
        match err {
            ShellError::EndOfInput => Termination::EndOfInput,
            err @ (ShellError::Io(_) | ShellError::Interrupted) => Termination::ConsoleFailure(err),
        }
    }
}

pub fn banner() -> String {
    format!("Welcome to mysh v{}", env!("CARGO_PKG_VERSION"))
}

/// Run a session until a command terminates it or the console gives out.
pub fn run(env: &mut Environment) -> Termination {
    tracing::info!(commands = env.commands().len(), "session started");
    let termination = match env.writeln(&banner()).and_then(|()| run_loop(env)) {
        Ok(()) => Termination::Exit,
        Err(err) => Termination::from(err),
    };

    match &termination {
        Termination::ConsoleFailure(err) => tracing::warn!("session aborted: {}", err),
        other => tracing::info!("session ended: {:?}", other),
    }
    termination
}

fn run_loop(env: &mut Environment) -> ShellResult<()> {
    loop {
        let prompt = format!("{} ", env.prompt_symbol());
        env.write(&prompt)?;
        let line = match read_logical_line(env) {
            Ok(line) => line,
            Err(ShellError::Interrupted) => continue,
            Err(err) => return Err(err),
        };
        match execute_line(env, &line) {
            Ok(ShellStatus::Terminate) => return Ok(()),
            Ok(ShellStatus::Continue) | Err(ShellError::Interrupted) => {}
            Err(err) => return Err(err),
        }
    }
}

/// Read raw lines until one does not end with the MORELINE symbol.
///
/// Each continued line loses its trailing symbol and is joined to the next
/// with a single space. An interrupt drops everything gathered so far.
pub fn read_logical_line(env: &mut Environment) -> ShellResult<String> {
    let mut logical = String::new();
    loop {
        let mut line = env.read_line()?;
        let moreline = env.moreline_symbol();
        if !line.ends_with(moreline) {
            logical.push_str(&line);
            return Ok(logical);
        }

        line.pop();
        logical.push_str(&line);
        logical.push(' ');
        let continuation = format!("{} ", env.multiline_symbol());
        env.write(&continuation)?;
    }
}

/// Split a logical line into the command name and its argument remainder.
///
/// The split happens at the first run of whitespace. Every double quote in
/// the remainder is dropped, paired or not.
pub fn split_command_line(line: &str) -> (&str, Option<String>) {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, Some(rest.trim_start().replace('"', ""))),
        None => (line, None),
    }
}

/// Dispatch one logical line through the registry.
///
/// The line is taken as typed: a blank line or one starting with whitespace
/// has an empty command name and is rejected like any other unknown name.
pub fn execute_line(env: &mut Environment, line: &str) -> ShellResult<ShellStatus> {
    let (name, arguments) = split_command_line(line);
    let Some(command) = env.commands().get(name).copied() else {
        tracing::debug!(name, "unknown command");
        env.writeln("Invalid command name.")?;
        return Ok(ShellStatus::Continue);
    };

    tracing::debug!(name, arguments = ?arguments, "dispatching");
    (command.execute)(env, arguments.as_deref())
}
