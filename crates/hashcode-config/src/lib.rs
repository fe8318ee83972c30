//! Configuration for the structural hash engine.
//!
//! Controls how the structural traversal reacts to shapes it cannot hash,
//! to reference cycles, and how deep it is allowed to recurse. The settings
//! apply to every value a configured `StructuralHasher` reaches, typed or
//! dynamic; plain `hashcode()` calls use the defaults.
//!
//! # Examples
//!
//! ```
//! use hashcode_config::HashConfig;
//!
//! let config = HashConfig::from_toml_str(r#"
//!     strict = true
//!     max_depth = 64
//! "#).unwrap();
//!
//! assert!(config.strict);
//! assert_eq!(config.max_depth, Some(64));
//! ```
//!
//! Use the default config when the file is missing:
//!
//! ```
//! use hashcode_config::HashConfig;
//!
//! let config = HashConfig::load("hashcode.toml").unwrap_or_default();
//! assert!(!config.strict);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Traversal settings for dynamic values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub struct HashConfig {
    /// Surface unsupported shapes, exceeded depth and reference cycles as
    /// errors instead of hashing them to 0.
    #[serde(default)]
    pub strict: bool,

    /// Maximum nesting depth of composites and references. `None` is
    /// unbounded.
    #[serde(default)]
    pub max_depth: Option<usize>,
}

impl HashConfig {
    /// Creates the default, lenient and unbounded, configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Enables or disables strict mode.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the maximum traversal depth. Zero is rejected by
    /// [`HashConfig::validate`].
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Removes the traversal depth limit.
    pub fn unbounded(mut self) -> Self {
        self.max_depth = None;
        self
    }

    /// Checks the configuration for values the engine cannot honor.
    ///
    /// A depth limit of zero would reject every composite, including the
    /// empty sequence, so it is refused.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
