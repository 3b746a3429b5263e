//! Driver configuration.
//!
//! A flat `key = value` store. Values are kept as text and interpreted by
//! the typed getters, which fall back to a caller-supplied default when a
//! key is missing or does not parse.
//!
//! ```text
//! # sable.conf
//! warnings = false
//! max_errors = 3
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, PoisonError, RwLock};
use thiserror::Error;

/// Settings present before any file is loaded.
pub const DEFAULTS: [(&str, &str); 7] = [
    ("debug", "false"),
    ("optimize", "true"),
    ("warnings", "true"),
    ("max_errors", "10"),
    ("indent_size", "4"),
    ("tab_width", "4"),
    ("encoding", "utf-8"),
];

/// Errors from loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A non-comment line without `=`, or with an empty key.
    #[error("malformed configuration at line {line}: '{text}'")]
    Malformed {
        /// 1-indexed line number
        line: usize,
        /// The offending line
        text: String,
    },

    /// The file could not be read or written.
    #[error("cannot access configuration file '{}'", path.display())]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

/// Key/value configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    settings: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a configuration holding the [`DEFAULTS`].
    #[must_use]
    pub fn new() -> Self {
        let settings = DEFAULTS
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        Self { settings }
    }

    /// Parses `key = value` lines over the defaults.
    ///
    /// Blank lines and lines starting with `#` are ignored; keys and values
    /// are trimmed.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        config.merge(text)?;
        Ok(config)
    }

    /// Reads settings from `path`, overriding the current values.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge(&text)
    }

    /// Writes every setting to `path`, sorted by key.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        fs::write(path, self.to_string()).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    fn merge(&mut self, text: &str) -> Result<(), ConfigError> {
        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || ConfigError::Malformed {
                line: index + 1,
                text: line.to_string(),
            };
            let (key, value) = line.split_once('=').ok_or_else(malformed)?;
            let key = key.trim();
            if key.is_empty() {
                return Err(malformed());
            }
            self.set(key, value.trim());
        }
        Ok(())
    }

    /// Raw value of `key`, or `default`.
    #[must_use]
    pub fn get<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.settings.get(key).map_or(default, String::as_str)
    }

    /// Sets `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.settings.insert(key.into(), value.into());
    }

    /// Returns `true` if `key` has a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.settings.contains_key(key)
    }

    /// `true`, `1`, `yes` and `on` (any case) are true; `false`, `0`, `no`
    /// and `off` are false; anything else yields `default`.
    #[must_use]
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        let Some(value) = self.settings.get(key) else {
            return default;
        };
        match value.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => true,
            "false" | "0" | "no" | "off" => false,
            _ => default,
        }
    }

    /// Integer value of `key`, or `default`.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.settings
            .get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }

    /// Float value of `key`, or `default`.
    #[must_use]
    pub fn get_float(&self, key: &str, default: f64) -> f64 {
        self.settings
            .get(key)
            .and_then(|value| value.parse().ok())
            .unwrap_or(default)
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.settings {
            writeln!(f, "{key} = {value}")?;
        }
        Ok(())
    }
}

/// The process-wide configuration.
pub fn global() -> &'static RwLock<Config> {
    static GLOBAL: OnceLock<RwLock<Config>> = OnceLock::new();
    GLOBAL.get_or_init(|| RwLock::new(Config::new()))
}

/// A copy of the process-wide configuration.
#[must_use]
pub fn snapshot() -> Config {
    global()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Replaces the process-wide configuration.
pub fn install(config: Config) {
    *global().write().unwrap_or_else(PoisonError::into_inner) = config;
}
