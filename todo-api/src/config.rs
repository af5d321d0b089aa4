use db::Variant;
use error::ConfigError;
use serde::{Deserialize, Serialize};

/// API service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// HTTP server address
    pub bind_addr: String,

    /// Which database settings the connection provider uses
    pub db_variant: Variant,

    /// Service version
    pub version: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            db_variant: Variant::Local,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl ApiConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(addr) = lookup("API_ADDR") {
            config.bind_addr = addr;
        }

        if let Some(variant) = lookup("DB_VARIANT") {
            config.db_variant = variant.parse()?;
        }

        Ok(config)
    }
}
