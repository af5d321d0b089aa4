//! Connection provider.
//!
//! One constructor covers both the local and the deployed settings, so
//! request handlers only ever ask the provider for a fresh connection.

use error::{ConfigError, DatabaseError};

use crate::config::{DbConfig, Variant};
use crate::connection::{self, DbConnection};

#[derive(Debug, Clone)]
enum Source {
    Variant(Variant),
    Fixed(DbConfig),
}

/// Produces database connections on demand.
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    source: Source,
}

impl ConnectionProvider {
    /// Provider for one of the built-in variants.
    pub fn new(variant: Variant) -> Self {
        Self {
            source: Source::Variant(variant),
        }
    }

    /// Provider with explicit settings.
    pub fn from_config(config: DbConfig) -> Self {
        Self {
            source: Source::Fixed(config),
        }
    }

    /// The variant this provider was built for, if any.
    pub fn variant(&self) -> Option<Variant> {
        match &self.source {
            Source::Variant(variant) => Some(*variant),
            Source::Fixed(_) => None,
        }
    }

    /// Settings for the next connection.
    ///
    /// The deployed variant reads the environment on every call.
    pub fn resolve(&self) -> Result<DbConfig, ConfigError> {
        match &self.source {
            Source::Variant(Variant::Local) => Ok(DbConfig::local()),
            Source::Variant(Variant::Deployed) => DbConfig::from_env(),
            Source::Fixed(config) => Ok(config.clone()),
        }
    }

    /// Open a new connection. The caller owns and closes it.
    pub async fn connect(&self) -> Result<DbConnection, DatabaseError> {
        let config = self.resolve_logged()?;
        connection::connect(&config).await
    }

    /// Probe the database with a throwaway connection.
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        let config = self.resolve_logged()?;
        connection::health_check(&config).await
    }

    fn resolve_logged(&self) -> Result<DbConfig, DatabaseError> {
        self.resolve().map_err(|e| {
            tracing::error!("Invalid database configuration: {}", e);
            DatabaseError::from(e)
        })
    }
}

impl Default for ConnectionProvider {
    fn default() -> Self {
        Self::new(Variant::default())
    }
}
