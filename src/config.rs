// src/config.rs

//! Manages engine configuration: loading, defaults, and validation.

use crate::core::KeyspaceError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

/// Configuration for the keyspace engine.
///
/// The prefix is fixed for the engine's lifetime; applications that embed a
/// delimiter (for example `"billing:"`) do so in the prefix itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KeyspaceConfig {
    /// The string prepended to every key argument.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Log filter applied by the embedding application's subscriber.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for KeyspaceConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            log_level: default_log_level(),
        }
    }
}

fn default_prefix() -> String {
    String::new()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl KeyspaceConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        let config: KeyspaceConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse TOML from '{path}'"))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects prefixes that would make diagnostics and key inspection
    /// ambiguous. An empty prefix is legal but turns rewriting into the
    /// identity, so it is reported.
    pub fn validate(&self) -> std::result::Result<(), KeyspaceError> {
        if self.prefix.bytes().any(|b| b.is_ascii_control()) {
            return Err(KeyspaceError::InvalidConfig(
                "prefix must not contain control characters".to_string(),
            ));
        }
        if self.prefix.is_empty() {
            warn!("keyspace prefix is empty; commands will pass through unmodified");
        }
        Ok(())
    }
}
