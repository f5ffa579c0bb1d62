use crate::{ConfigError, MyshConfig};
use regex::Regex;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/mysh/mysh.yaml"));
        }
        search_paths.push(PathBuf::from("./mysh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/mysh/mysh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        self.explicit_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Replace the default search locations, lowest priority first.
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<MyshConfig, ConfigError> {
        let mut config = MyshConfig::default();

        if let Some(ref explicit) = self.explicit_file {
            config = self.parse_yaml(&read_file(explicit)?)?;
        } else if let Ok(env_path) = std::env::var("MYSH_CONFIG") {
            config = self.parse_yaml(&read_file(Path::new(&env_path))?)?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    match std::fs::read_to_string(path) {
                        Ok(content) => {
                            tracing::debug!("merging config from {}", path.display());
                            config = self.merge_yaml(&config, &content)?;
                        }
                        Err(e) => {
                            tracing::warn!("skipping unreadable config {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        self.apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn parse_yaml(&self, content: &str) -> Result<MyshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    /// Layer `content` over `base`. Only keys present in `content` replace
    /// values, so a later file can also restore a default.
    fn merge_yaml(&self, base: &MyshConfig, content: &str) -> Result<MyshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        let overlay: Value = serde_yaml::from_str(&expanded)?;
        let mut merged = serde_yaml::to_value(base)?;
        merge_values(&mut merged, overlay);
        Ok(serde_yaml::from_value(merged)?)
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid");
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut MyshConfig) {
        if let Some(c) = env_char("MYSH_PROMPT") {
            config.shell.symbols.prompt = c;
        }
        if let Some(c) = env_char("MYSH_MULTILINE") {
            config.shell.symbols.multiline = c;
        }
        if let Some(c) = env_char("MYSH_MORELINE") {
            config.shell.symbols.moreline = c;
        }
        if let Ok(charset) = std::env::var("MYSH_CHARSET") {
            if !charset.is_empty() {
                config.shell.charset = charset;
            }
        }
        if let Ok(file) = std::env::var("MYSH_HISTORY_FILE") {
            if !file.is_empty() {
                config.shell.history.file = file;
            }
        }
        if let Ok(level) = std::env::var("MYSH_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
    }
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        // Empty documents and bare keys leave the base alone.
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay,
    }
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

fn env_char(name: &str) -> Option<char> {
    std::env::var(name).ok().and_then(|v| v.chars().next())
}
