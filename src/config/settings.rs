//! Application settings loaded from config.toml with environment overrides.
//!
//! The file supplies the server bind address, the database URL, and the
//! default budget allocation new accounts start from. `DATABASE_URL` and
//! `BIND_ADDR` environment variables (typically via `.env`) take precedence
//! over the file, and every field has a sensible default so the service runs
//! with no config file at all.

use crate::{
    config::database::DEFAULT_DATABASE_URL,
    core::allocation::AllocationConfig,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;

/// Default address the API server listens on.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings
    pub server: ServerConfig,
    /// Database settings
    pub database: DatabaseConfig,
    /// Allocation new accounts are seeded with
    pub default_allocation: AllocationConfig,
}

/// `[server]` section of config.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to bind, e.g. `127.0.0.1:3001`
    pub bind_addr: String,
}

/// `[database]` section of config.toml.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            default_allocation: AllocationConfig::default(),
        }
    }
}

/// Loads configuration from a TOML file.
///
/// # Errors
/// Returns [`Error::Config`] if the file cannot be read, the TOML is invalid,
/// or the seeded default allocation does not sum to 100.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading configuration from {:?}", path_ref);

    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;

    let config: AppConfig = toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config file {path_ref:?}: {e}"),
    })?;

    config.default_allocation.validate()?;
    Ok(config)
}

/// Loads configuration from `./config.toml` if present, falling back to
/// defaults, then applies `BIND_ADDR` and `DATABASE_URL` environment
/// overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let mut config = if Path::new("config.toml").exists() {
        load_config("config.toml")?
    } else {
        tracing::info!("No config.toml found, using defaults");
        AppConfig::default()
    };

    if let Ok(bind_addr) = std::env::var("BIND_ADDR") {
        config.server.bind_addr = bind_addr;
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }

    Ok(config)
}
