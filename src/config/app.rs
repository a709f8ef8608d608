//! Application configuration loading from config.toml
//!
//! All sections are optional: a missing file or a missing key falls back to the
//! defaults below. `DATABASE_URL` and `BIND_ADDRESS` from the environment (or `.env`)
//! take precedence over the file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP listener settings
    pub server: ServerConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Upload limits
    pub upload: UploadConfig,
}

/// `[server]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
        }
    }
}

/// `[database]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/dynamic_product.sqlite?mode=rwc".to_string(),
        }
    }
}

/// `[upload]` section
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UploadConfig {
    /// Largest accepted request body in bytes
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Replaces file values with the ones given, leaving `None` entries untouched.
    #[must_use]
    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        bind_address: Option<String>,
    ) -> Self {
        if let Some(url) = database_url {
            self.database.url = url;
        }
        if let Some(address) = bind_address {
            self.server.bind_address = address;
        }
        self
    }
}

/// Loads application configuration from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads ./config.toml when present, otherwise defaults, then applies environment overrides.
pub fn load_default_config() -> Result<AppConfig> {
    let config = if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)?
    } else {
        tracing::debug!("No {DEFAULT_CONFIG_PATH} found, using defaults");
        AppConfig::default()
    };

    Ok(config.with_overrides(
        std::env::var("DATABASE_URL").ok(),
        std::env::var("BIND_ADDRESS").ok(),
    ))
}
