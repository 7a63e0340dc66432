//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `SHOPHUB_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPHUB_PORT` - Listen port (default: 3000)
//! - `SHOPHUB_CATALOG_URL` - Base URL of the remote catalog API
//!   (default: `https://fakestoreapi.com`)
//! - `SHOPHUB_DATA_DIR` - Directory for locally persisted state such as
//!   the wishlist (default: `data`)
//!
//! All variables have defaults; the storefront runs with no configuration
//! at all against the public catalog API.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct ShopHubConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Remote catalog API configuration
    pub catalog: CatalogConfig,
    /// Directory for locally persisted key-value state
    pub data_dir: PathBuf,
}

/// Remote catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API, without a trailing slash.
    pub base_url: String,
}

/// Default public catalog API.
const DEFAULT_CATALOG_URL: &str = "https://fakestoreapi.com";

impl ShopHubConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be
    /// parsed or validated.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("SHOPHUB_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPHUB_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("SHOPHUB_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SHOPHUB_PORT".to_string(), e.to_string()))?;

        let catalog = CatalogConfig::from_env()?;
        let data_dir = PathBuf::from(get_env_or_default("SHOPHUB_DATA_DIR", "data"));

        Ok(Self {
            host,
            port,
            catalog,
            data_dir,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("SHOPHUB_CATALOG_URL", DEFAULT_CATALOG_URL);
        Self::new(&raw)
    }

    /// Create a catalog configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL does not parse as an absolute
    /// http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let parsed = url::Url::parse(base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("SHOPHUB_CATALOG_URL".to_string(), e.to_string())
        })?;
        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPHUB_CATALOG_URL".to_string(),
                "must have a host".to_string(),
            ));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
