//! Configuration management for docargs programs.
//!
//! Handles loading registration options from a TOML file. The file is optional;
//! a missing file yields the defaults.
//!
//! ```toml
//! prog_name = "git"
//!
//! [dispatch]
//! auto_dispatch = true
//! private_prefix = "_"
//! ```

use crate::error::{DocargsError, Result};
use crate::program::Options;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "DOCARGS_CONFIG";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Program name shown in usage lines.
    #[serde(default)]
    pub prog_name: Option<String>,

    /// Dispatch behavior.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

/// Dispatch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Parse the process arguments and call the handler on invoke.
    #[serde(default = "default_auto_dispatch")]
    pub auto_dispatch: bool,

    /// Members whose names start with this prefix are not exposed.
    #[serde(default = "default_private_prefix")]
    pub private_prefix: String,
}

fn default_auto_dispatch() -> bool {
    true
}

fn default_private_prefix() -> String {
    "_".to_string()
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            auto_dispatch: default_auto_dispatch(),
            private_prefix: default_private_prefix(),
        }
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("docargs")
            .join("config.toml")
    }

    /// Returns the config path from `DOCARGS_CONFIG`, or the default path.
    pub fn resolve_path() -> PathBuf {
        std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_path)
    }

    /// Loads configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DocargsError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    /// Parses configuration from a TOML string.
    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DocargsError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }

    /// Converts the file contents into registration options.
    pub fn options(&self) -> Options {
        Options {
            prog_name: self.prog_name.clone(),
            auto_dispatch: self.dispatch.auto_dispatch,
            private_prefix: self.dispatch.private_prefix.clone(),
        }
    }
}
