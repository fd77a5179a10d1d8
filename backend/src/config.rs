//! Application configuration.
//!
//! Loaded from a TOML file; any missing section falls back to its default so
//! a partial config (or none at all) still boots the server.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::EmailConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub email: EmailConfig,
    pub invite: InviteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:finance_tracker.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteConfig {
    /// Base URL invite links point at
    pub base_url: String,
}

impl Default for InviteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(config_path: &Path) -> Result<Self> {
        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: AppConfig =
            toml::from_str(&config_content).context("Failed to parse config TOML")?;

        Ok(config)
    }

    pub fn load_or_default(config_path: &Path) -> Self {
        match Self::load(config_path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config from {:?}: {}", config_path, e);
                tracing::info!("Using default configuration");
                AppConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:finance_tracker.db");
        assert!(!config.email.is_complete());
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [server]
            port = 4000

            [invite]
            base_url = "https://app.example.com"
            "#,
        )
        .expect("Failed to parse config");

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.invite.base_url, "https://app.example.com");
        assert_eq!(config.database.url, "sqlite:finance_tracker.db");
    }

    #[test]
    fn test_load_or_default_for_missing_file() {
        let config = AppConfig::load_or_default(Path::new("/does/not/exist.toml"));
        assert_eq!(config.server.port, 3000);
    }
}
