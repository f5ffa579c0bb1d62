//! mysh Configuration System
//!
//! Provides YAML-based configuration for the mysh shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/mysh/mysh.yaml` (system-wide)
//! 3. `~/.config/mysh/mysh.yaml` (user)
//! 4. `./mysh.yaml` (project-local)
//! 5. `MYSH_CONFIG=/path/to/config.yaml` or `--config` (explicit, replaces 2-4)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   symbols:
//!     prompt: ">"
//!     multiline: "|"
//!     moreline: "\\"
//!   charset: "UTF-8"
//!   history:
//!     enabled: true
//!     file: "~/.mysh_history"
//!     max_entries: 1000
//!
//! logging:
//!   level: warn
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<MyshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<MyshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = MyshConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.shell.symbols.prompt, '>');
        assert_eq!(config.shell.symbols.multiline, '|');
        assert_eq!(config.shell.symbols.moreline, '\\');
        assert_eq!(config.shell.charset, "UTF-8");
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r#"
shell:
  symbols:
    prompt: "?"
"#;
        let config: MyshConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.symbols.prompt, '?');
        assert_eq!(config.shell.symbols.multiline, '|'); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  symbols:
    prompt: "$"
    multiline: "+"
    moreline: "&"
  charset: windows-1250
  history:
    enabled: false
    file: /tmp/mysh_history
    max_entries: 50

logging:
  level: debug
  format: compact
"#;
        let config: MyshConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.symbols.prompt, '$');
        assert_eq!(config.shell.symbols.multiline, '+');
        assert_eq!(config.shell.symbols.moreline, '&');
        assert_eq!(config.shell.charset, "windows-1250");
        assert!(!config.shell.history.enabled);
        assert_eq!(config.shell.history.max_entries, 50);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn multi_character_symbol_is_a_parse_error() {
        let yaml = "shell:\n  symbols:\n    prompt: \">>\"\n";
        assert!(serde_yaml::from_str::<MyshConfig>(yaml).is_err());
    }
}
