//! Configuration management for Kestrel
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (KESTREL_*)
//! 3. Config file (~/.config/kestrel/config.toml)
//! 4. Default values

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::diff::WindowConfig;
use crate::{Error, Result};

/// Review engine (Ollama) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the Ollama endpoint
    pub endpoint: String,

    /// Model tag to pull and run
    pub model: String,

    /// Per-call timeout for engine invocations
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://ollama:7869".to_string(),
            model: "llama3.1:8b".to_string(),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Review engine configuration
    pub engine: EngineConfig,

    /// Context window sizing
    pub review: WindowConfig,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();

        if let Some(path) = config_path {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/kestrel/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kestrel").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - KESTREL_OLLAMA_ENDPOINT: Base URL of the Ollama endpoint
    /// - KESTREL_OLLAMA_MODEL: Model tag to use
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(endpoint) = std::env::var("KESTREL_OLLAMA_ENDPOINT") {
            self.engine.endpoint = endpoint;
        }

        if let Ok(model) = std::env::var("KESTREL_OLLAMA_MODEL") {
            self.engine.model = model;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, endpoint: Option<String>, model: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.engine.endpoint = endpoint;
        }

        if let Some(model) = model {
            self.engine.model = model;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(endpoint: Option<String>, model: Option<String>) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(endpoint, model))
    }
}
