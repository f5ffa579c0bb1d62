use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MyshConfig {
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

impl MyshConfig {
    /// Reject values the shell cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shell.symbols.validate()?;
        if self.shell.charset.trim().is_empty() {
            return Err(ConfigError::InvalidValue(
                "shell.charset must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub symbols: SymbolsConfig,
    /// Charset label used by `cat` when none is given.
    pub charset: String,
    pub history: HistoryConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            symbols: SymbolsConfig::default(),
            charset: "UTF-8".to_string(),
            history: HistoryConfig::default(),
        }
    }
}

/// Startup values of the three shell symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SymbolsConfig {
    pub prompt: char,
    pub multiline: char,
    pub moreline: char,
}

impl Default for SymbolsConfig {
    fn default() -> Self {
        Self {
            prompt: '>',
            multiline: '|',
            moreline: '\\',
        }
    }
}

impl SymbolsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, symbol) in [
            ("prompt", self.prompt),
            ("multiline", self.multiline),
            ("moreline", self.moreline),
        ] {
            if symbol.is_whitespace() || symbol.is_control() {
                return Err(ConfigError::InvalidValue(format!(
                    "shell.symbols.{name} must be a printable character, got {symbol:?}"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub file: String,
    pub max_entries: usize,
}

impl HistoryConfig {
    /// History file path with a leading `~/` expanded to the home directory.
    pub fn resolved_file(&self) -> PathBuf {
        match (self.file.strip_prefix("~/"), dirs::home_dir()) {
            (Some(stripped), Some(home)) => home.join(stripped),
            _ => PathBuf::from(&self.file),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file: "~/.mysh_history".to_string(),
            max_entries: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Full `EnvFilter` directive; wins over `level` when set.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Pretty,
            filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
}
