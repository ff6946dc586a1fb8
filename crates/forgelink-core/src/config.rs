//! Endpoint configuration for forgelink.
//!
//! Handles loading and saving configuration from TOML files.
//! Config files are stored in platform-specific locations:
//!
//! - **macOS/Linux**: `~/.config/forgelink/config.toml`
//! - **Windows**: `%APPDATA%\forgelink\config.toml`
//!
//! Endpoints are kept in file order; the resolver treats earlier entries as
//! higher priority.
//!
//! # Example
//!
//! ```ignore
//! use forgelink_core::config::Config;
//! use forgelink_core::ProviderFamily;
//!
//! let mut config = Config::load()?;
//! config.add_endpoint(ProviderFamily::Cloud, "bithub.org", None);
//! config.save()?;
//! ```

use crate::{Error, ProviderFamily, RemoteEndpoint, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

/// Config file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Config directory name.
const CONFIG_DIR_NAME: &str = "forgelink";

// =============================================================================
// Configuration structures
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Hosting endpoints, in priority order
    #[serde(default, rename = "endpoint")]
    pub endpoints: Vec<EndpointConfig>,
}

/// One configured hosting endpoint (`[[endpoint]]` table in TOML).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Provider family (`cloud` or `server`)
    pub family: ProviderFamily,
    /// Host matched against remote URLs
    pub match_host: String,
    /// Host used in web URLs; defaults to `match_host`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_host: Option<String>,
}

impl EndpointConfig {
    /// Produce the immutable endpoint handed to the resolver.
    pub fn to_endpoint(&self) -> RemoteEndpoint {
        RemoteEndpoint {
            family: self.family,
            match_host: self.match_host.clone(),
            display_host: self
                .display_host
                .clone()
                .unwrap_or_else(|| self.match_host.clone()),
        }
    }
}

// =============================================================================
// Config implementation
// =============================================================================

impl Config {
    /// Get the configuration directory path.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the configuration file path.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default location.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    ///
    /// Returns a default (empty) config if the file doesn't exist.
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            debug!(path = ?path, "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        debug!(path = ?path, "Loading config");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config file: {}", e)))?;

        info!(path = ?path, endpoints = config.endpoints.len(), "Config loaded");
        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {}", e)))?;
        }

        debug!(path = ?path, "Saving config");

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, contents)
            .map_err(|e| Error::Config(format!("Failed to write config file: {}", e)))?;

        info!(path = ?path, "Config saved");
        Ok(())
    }

    /// Whether any endpoint is configured.
    pub fn has_endpoints(&self) -> bool {
        !self.endpoints.is_empty()
    }

    /// The resolver-facing endpoint list, in configuration order.
    pub fn resolver_endpoints(&self) -> Vec<RemoteEndpoint> {
        self.endpoints.iter().map(EndpointConfig::to_endpoint).collect()
    }

    /// Append an endpoint at the lowest priority.
    pub fn add_endpoint(
        &mut self,
        family: ProviderFamily,
        match_host: impl Into<String>,
        display_host: Option<String>,
    ) {
        self.endpoints.push(EndpointConfig {
            family,
            match_host: match_host.into(),
            display_host,
        });
    }
}

// =============================================================================
// Tests
// =============================================================================
