//! Session environment: console, registry and shell symbols

use std::fmt;
use std::io;
use std::str::FromStr;

use encoding_rs::Encoding;
use mysh_config::SymbolsConfig;

use crate::console::Console;
use crate::error::{ShellError, ShellResult};
use crate::registry::Registry;

/// Outcome of a command invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStatus {
    Continue,
    Terminate,
}

/// The three runtime-configurable shell symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    /// Printed before every command.
    Prompt,
    /// Printed while waiting for a continuation line.
    Multiline,
    /// Trailing character that asks for another line.
    Moreline,
}

impl Symbol {
    pub const ALL: [Symbol; 3] = [Symbol::Prompt, Symbol::Multiline, Symbol::Moreline];

    pub fn name(self) -> &'static str {
        match self {
            Symbol::Prompt => "PROMPT",
            Symbol::Multiline => "MULTILINE",
            Symbol::Moreline => "MORELINE",
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Symbol::ALL
            .into_iter()
            .find(|symbol| symbol.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| s.to_string())
    }
}

/// Per-session state shared with every command.
pub struct Environment {
    console: Box<dyn Console>,
    registry: Registry,
    prompt: char,
    multiline: char,
    moreline: char,
    default_charset: &'static Encoding,
}

impl Environment {
    pub fn new(console: Box<dyn Console>, registry: Registry) -> Self {
        let symbols = SymbolsConfig::default();
        Self {
            console,
            registry,
            prompt: symbols.prompt,
            multiline: symbols.multiline,
            moreline: symbols.moreline,
            default_charset: encoding_rs::UTF_8,
        }
    }

    /// Start the session with the given symbols instead of the defaults.
    pub fn with_symbols(mut self, symbols: SymbolsConfig) -> Self {
        self.prompt = symbols.prompt;
        self.multiline = symbols.multiline;
        self.moreline = symbols.moreline;
        self
    }

    pub fn with_default_charset(mut self, charset: &'static Encoding) -> Self {
        self.default_charset = charset;
        self
    }

    pub fn read_line(&mut self) -> ShellResult<String> {
        match self.console.read_line() {
            Ok(Some(line)) => Ok(line),
            Ok(None) => Err(ShellError::EndOfInput),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Err(ShellError::Interrupted),
            Err(e) => Err(ShellError::Io(e)),
        }
    }

    pub fn write(&mut self, text: &str) -> ShellResult<()> {
        self.console.write(text).map_err(ShellError::Io)
    }

    pub fn writeln(&mut self, text: &str) -> ShellResult<()> {
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');
        self.write(&line)
    }

    /// Registered commands in name order.
    pub fn commands(&self) -> &Registry {
        &self.registry
    }

    pub fn symbol(&self, symbol: Symbol) -> char {
        match symbol {
            Symbol::Prompt => self.prompt,
            Symbol::Multiline => self.multiline,
            Symbol::Moreline => self.moreline,
        }
    }

    /// Announce the change on the console, then apply it.
    pub fn set_symbol(&mut self, symbol: Symbol, value: char) -> ShellResult<()> {
        let old = self.symbol(symbol);
        self.writeln(&format!(
            "Symbol for {symbol} changed from '{old}' to '{value}'."
        ))?;
        match symbol {
            Symbol::Prompt => self.prompt = value,
            Symbol::Multiline => self.multiline = value,
            Symbol::Moreline => self.moreline = value,
        }
        tracing::debug!(%symbol, %old, new = %value, "symbol changed");
        Ok(())
    }

    pub fn prompt_symbol(&self) -> char {
        self.prompt
    }

    pub fn multiline_symbol(&self) -> char {
        self.multiline
    }

    pub fn moreline_symbol(&self) -> char {
        self.moreline
    }

    pub fn default_charset(&self) -> &'static Encoding {
        self.default_charset
    }
}
