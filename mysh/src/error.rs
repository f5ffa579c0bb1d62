//! Error types for mysh

use thiserror::Error;

/// Result type alias for mysh operations
pub type ShellResult<T> = Result<T, ShellError>;

/// Errors that escape a command and end the session.
///
/// File-level failures never show up here: commands report them on the
/// console and keep the session running.
#[derive(Error, Debug)]
pub enum ShellError {
    /// The console could not be read or written
    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The console has no more input
    #[error("End of input")]
    EndOfInput,

    /// The user abandoned the line being typed
    #[error("Interrupted")]
    Interrupted,
}
