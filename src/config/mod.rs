//! Configuration loading and management

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Server configuration.
///
/// Loaded from YAML, with environment overrides applied afterwards
/// (`COURSEBOOK_HOST`, `COURSEBOOK_PORT`, `DATABASE_URL`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (e.g., "127.0.0.1")
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// PostgreSQL connection string; when absent the in-memory backend
    /// is used.
    #[serde(default)]
    pub database_url: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply environment overrides from the process environment.
    pub fn from_env(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup (injectable for tests).
    ///
    /// An unparseable `COURSEBOOK_PORT` is ignored and the configured
    /// port kept.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("COURSEBOOK_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("COURSEBOOK_PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url);
        }
        self
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Create a default configuration for testing
    pub fn default_config() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
        }
    }
}
