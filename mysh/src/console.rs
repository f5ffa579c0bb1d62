//! Line transports behind the shell environment

use std::cell::RefCell;
use std::io::{self, BufRead, Stdout, StdinLock, Write};
use std::path::PathBuf;
use std::rc::Rc;

use mysh_config::HistoryConfig;
use rustyline::error::ReadlineError;
use rustyline::{Config, DefaultEditor};

/// A source of raw input lines and a sink for output text.
pub trait Console {
    /// Read the next raw line without its terminator. `Ok(None)` means the
    /// input is exhausted; an [`io::ErrorKind::Interrupted`] error abandons
    /// the line being assembled.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Write `text` as-is and flush.
    fn write(&mut self, text: &str) -> io::Result<()>;
}

/// Console over any buffered reader and writer.
pub struct StdConsole<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> StdConsole<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl StdConsole<StdinLock<'static>, Stdout> {
    /// Console on the process' standard input and output.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl StdConsole<io::Cursor<Vec<u8>>, CapturedOutput> {
    /// Console that replays `input` and records everything written.
    pub fn scripted(input: &str, output: CapturedOutput) -> Self {
        Self::new(io::Cursor::new(input.as_bytes().to_vec()), output)
    }
}

impl<R: BufRead, W: Write> Console for StdConsole<R, W> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}

/// Shared in-memory sink; clones write into the same buffer.
#[derive(Clone, Default)]
pub struct CapturedOutput(Rc<RefCell<Vec<u8>>>);

impl CapturedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Interactive console backed by a line editor with history.
///
/// Completed output lines go straight to stdout. Text after the last line
/// break (the prompt symbol, an overwrite question) is held back and handed
/// to the editor as its prompt, so redraws keep it on screen.
pub struct EditorConsole {
    editor: DefaultEditor,
    history_path: PathBuf,
    pending: String,
}

impl EditorConsole {
    pub fn new(history: &HistoryConfig) -> rustyline::Result<Self> {
        let config = Config::builder()
            .max_history_size(history.max_entries)?
            .history_ignore_dups(true)?
            .history_ignore_space(true)
            .build();

        let mut editor = DefaultEditor::with_config(config)?;
        let history_path = history.resolved_file();
        if let Err(e) = editor.load_history(&history_path) {
            tracing::debug!("no history loaded from {}: {}", history_path.display(), e);
        }

        Ok(Self {
            editor,
            history_path,
            pending: String::new(),
        })
    }
}

impl Console for EditorConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let prompt = std::mem::take(&mut self.pending);
        match self.editor.readline(&prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = self.editor.add_history_entry(line.as_str());
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => Err(io::ErrorKind::Interrupted.into()),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.pending.push_str(text);
        if let Some(idx) = self.pending.rfind('\n') {
            let rest = self.pending.split_off(idx + 1);
            let mut stdout = io::stdout().lock();
            stdout.write_all(self.pending.as_bytes())?;
            stdout.flush()?;
            self.pending = rest;
        }
        Ok(())
    }
}

impl Drop for EditorConsole {
    fn drop(&mut self) {
        if let Err(e) = self.editor.save_history(&self.history_path) {
            tracing::warn!("failed to save history to {}: {}", self.history_path.display(), e);
        }
    }
}
