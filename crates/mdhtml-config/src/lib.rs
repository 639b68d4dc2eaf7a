//! mdhtml Config
//!
//! This crate handles configuration loading and management
//! for mdhtml, supporting TOML configuration files.
//!
//! # Overview
//!
//! Configuration is loaded from platform-specific locations:
//! - Linux: `~/.config/mdhtml/config.toml`
//! - macOS: `~/Library/Application Support/mdhtml/config.toml`
//! - Windows: `%APPDATA%\mdhtml\config.toml`
//!
//! # Example
//!
//! ```no_run
//! use mdhtml_config::Config;
//!
//! // Load config with defaults
//! let config = Config::load().unwrap();
//!
//! // Or load with an override file
//! let config = Config::load_with_override(Some("./custom.toml")).unwrap();
//! ```

mod errors;
mod output;

pub use errors::{ErrorPolicy, ErrorsConfig, ErrorsOverride};
pub use output::{OutputConfig, OutputOverride};

use mdhtml_core::{MdHtmlError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default TOML configuration string.
const DEFAULT_TOML: &str = r#"[output]
Newline         = true
SkipEmpty       = false
CloseOpenBlocks = true

[errors]
OnError = "abort"
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// How fragments are written
    #[serde(default)]
    pub output: OutputConfig,

    /// How failed lines are handled
    #[serde(default)]
    pub errors: ErrorsConfig,
}

/// A partial configuration: only the keys an override actually sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverride {
    #[serde(default)]
    pub output: OutputOverride,

    #[serde(default)]
    pub errors: ErrorsOverride,
}

impl Config {
    /// Returns the default TOML configuration string.
    ///
    /// # Example
    ///
    /// ```
    /// use mdhtml_config::Config;
    /// let toml = Config::default_toml();
    /// assert!(toml.contains("[output]"));
    /// assert!(toml.contains("[errors]"));
    /// ```
    pub fn default_toml() -> &'static str {
        DEFAULT_TOML
    }

    /// Returns the platform-specific configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "mdhtml")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Load configuration from the default platform-specific path.
    ///
    /// If no config file exists, returns the default configuration.
    pub fn load() -> Result<Self> {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                return Self::load_from(&config_path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        read_toml(path)
    }

    /// Load configuration with an optional override file or string.
    ///
    /// 1. Load the base config from the default location
    /// 2. If an override is provided and names an existing file, load and
    ///    merge it; otherwise parse the override itself as TOML and merge it
    ///
    /// # Example
    ///
    /// ```no_run
    /// use mdhtml_config::{Config, ErrorPolicy};
    ///
    /// let config = Config::load_with_override(Some("[errors]\nOnError = \"skip\"")).unwrap();
    /// assert_eq!(config.errors.on_error, ErrorPolicy::Skip);
    /// ```
    pub fn load_with_override(override_config: Option<&str>) -> Result<Self> {
        let mut config = Self::load()?;

        if let Some(override_str) = override_config {
            config.merge(&Self::resolve_override(override_str)?);
        }

        Ok(config)
    }

    /// Interpret an override as a file path if one exists, else as inline TOML.
    ///
    /// Only the keys present in the override are set in the result.
    pub fn resolve_override(override_str: &str) -> Result<ConfigOverride> {
        let override_path = Path::new(override_str);
        if override_path.exists() {
            read_toml(override_path)
        } else {
            toml::from_str(override_str)
                .map_err(|e| MdHtmlError::Config(format!("Override parse error: {}", e)))
        }
    }

    /// Merge an override into this config.
    ///
    /// Keys the override sets replace the values in `self`; keys it leaves
    /// out are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use mdhtml_config::{Config, ConfigOverride};
    ///
    /// let mut base = Config::default();
    /// base.output.skip_empty = true;
    /// let override_config: ConfigOverride = toml::from_str(r#"
    ///     [output]
    ///     Newline = false
    /// "#).unwrap();
    ///
    /// base.merge(&override_config);
    /// assert!(!base.output.newline);
    /// assert!(base.output.skip_empty);
    /// ```
    pub fn merge(&mut self, other: &ConfigOverride) {
        self.output.merge(&other.output);
        self.errors.merge(&other.errors);
    }

    /// Save configuration to a file.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| MdHtmlError::Config(format!("Serialization error: {}", e)))?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| MdHtmlError::Config(format!("Parse error in {}: {}", path.display(), e)))
}
