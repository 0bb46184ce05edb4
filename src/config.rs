//! Server configuration
//!
//! Settings are read from a TOML file and merged with command-line
//! arguments, CLI taking precedence:
//!
//! 1. `./boxforge.toml` in the working directory
//! 2. `<config dir>/boxforge/config.toml` (e.g. `~/.config/boxforge/`)
//! 3. Built-in defaults
//!
//! Missing files fall through to the next location; a file that exists but
//! fails to parse is an error so typos do not silently vanish.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::web::{DEFAULT_BIND, DEFAULT_PORT};

/// File looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "boxforge.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============ Config File Structure ============

/// Settings accepted in `boxforge.toml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the server binds to
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Port the server listens on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Language used when neither the query nor the request headers pick one
    #[serde(default = "default_language")]
    pub language: String,

    /// Restart the server when watched files change
    #[serde(default)]
    pub dev_reload: bool,

    /// Paths the reload watcher observes; empty means the server binary
    #[serde(default)]
    pub watch: Vec<PathBuf>,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_language() -> String {
    crate::i18n::DEFAULT_LANGUAGE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            language: default_language(),
            dev_reload: false,
            watch: Vec::new(),
        }
    }
}

// ============ Loading ============

impl Config {
    /// Load from the first config file that exists, or defaults
    pub fn load() -> Result<Self, ConfigError> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::load_from_path(&local);
        }
        if let Some(user) = Self::user_config_path() {
            if user.is_file() {
                return Self::load_from_path(&user);
            }
        }
        Ok(Self::default())
    }

    /// Load and parse a specific config file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Per-user config location, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("boxforge").join("config.toml"))
    }

    /// Apply command-line overrides on top of file values
    pub fn merge_with_cli(&self, cli: &CliOverrides) -> Config {
        let mut merged = self.clone();
        if let Some(bind) = &cli.bind {
            merged.bind = bind.clone();
        }
        if let Some(port) = cli.port {
            merged.port = port;
        }
        if let Some(language) = &cli.language {
            merged.language = language.clone();
        }
        if let Some(dev_reload) = cli.dev_reload {
            merged.dev_reload = dev_reload;
        }
        merged
    }
}

// ============ CLI Overrides ============

/// Values explicitly given on the command line
///
/// `None` means the flag was absent and the config file value stands.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub language: Option<String>,
    pub dev_reload: Option<bool>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }
}
