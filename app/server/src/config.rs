//! Server configuration loaded from TOML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level server configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind configuration.
    pub server: BindConfig,
    /// Tokio runtime tuning.
    pub runtime: RuntimeConfig,
}

/// Bind address configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BindConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind. Zero asks the OS for a free port.
    pub port: u16,
}

impl Default for BindConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Tokio runtime tuning.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Worker thread count. `None` uses the runtime default of one
    /// thread per CPU core.
    pub worker_threads: Option<usize>,
}

impl ServerConfig {
    /// Parse a TOML string into a `ServerConfig`.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).context("invalid server configuration")?;
        Ok(config)
    }

    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Load from `path` when it exists, otherwise fall back to the
    /// defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::info!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// The `host:port` string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
