//! CLI configuration file support
//!
//! Loads configuration from ~/.config/idforge/config.toml

use anyhow::{Context, Result};
use idforge_core::{IdError, Secret, paths};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable holding the generation secret.
pub const SECRET_ENV: &str = "IDFORGE_SECRET";

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Record store settings
    #[serde(default)]
    pub store: StoreConfig,
    /// Token generation settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Record store configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Record file path
    pub path: Option<PathBuf>,
}

/// Generator configuration
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Operator secret mixed into every ID
    pub secret: Option<String>,
}

impl std::fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .finish()
    }
}

impl CliConfig {
    /// Load configuration from default path
    pub fn load() -> Self {
        Self::load_from_path(paths::config_path())
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: Option<PathBuf>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "Ignoring invalid config file");
                Self::default()
            }),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "Failed to read config file");
                Self::default()
            }
        }
    }

    /// Resolve the record file: flag/env > config file > default data dir.
    pub fn store_path(&self, cli_store: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = cli_store {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.store.path {
            return Ok(path.clone());
        }
        paths::default_store_path().context("Failed to resolve the record file location")
    }

    /// Resolve the generation secret: IDFORGE_SECRET > config file.
    pub fn secret(&self) -> Result<Secret, IdError> {
        let from_env = std::env::var(SECRET_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty());

        match from_env.or_else(|| self.generator.secret.clone()) {
            Some(value) => Secret::new(value),
            None => Err(IdError::MissingSecret),
        }
    }
}
