//! Database configuration.

use std::fmt;
use std::str::FromStr;

use error::ConfigError;
use serde::{Deserialize, Serialize};
use sqlx::mysql::MySqlConnectOptions;

/// Host of the local variant.
pub const LOCAL_HOST: &str = "localhost";
/// Service name of the database container in the deployed variant.
pub const DEPLOYED_HOST: &str = "todo-mysql";
/// Character set used by both variants.
pub const DEFAULT_CHARSET: &str = "utf8mb4";
/// Collation pinned by the local variant.
pub const LOCAL_COLLATION: &str = "utf8mb4_unicode_ci";

pub const ENV_DATABASE: &str = "MYSQL_DATABASE";
pub const ENV_USER: &str = "MYSQL_USER";
pub const ENV_PASSWORD: &str = "MYSQL_PASSWORD";
pub const ENV_PORT: &str = "MYSQL_PORT";

/// Where a connection's settings come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Literal settings for running directly on a developer machine
    #[default]
    Local,
    /// Settings read from `MYSQL_*` environment variables inside a container
    Deployed,
}

impl FromStr for Variant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "deployed" => Ok(Self::Deployed),
            _ => Err(ConfigError::InvalidValue {
                key: "DB_VARIANT".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Deployed => f.write_str("deployed"),
        }
    }
}

/// Database configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Database host
    pub host: String,
    /// Database port, driver default when unset
    pub port: Option<u16>,
    /// Database name, none selected when unset
    pub database: Option<String>,
    /// Username
    pub username: String,
    /// Password
    pub password: String,
    /// Connection character set
    pub charset: String,
    /// Connection collation, server default for the charset when unset
    pub collation: Option<String>,
    /// Turn server warnings into errors for the session
    pub raise_on_warnings: bool,
}

impl DbConfig {
    /// Settings for a MySQL server on the local machine.
    pub fn local() -> Self {
        Self {
            host: LOCAL_HOST.to_string(),
            port: None,
            database: None,
            username: String::new(),
            password: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
            collation: Some(LOCAL_COLLATION.to_string()),
            raise_on_warnings: true,
        }
    }

    /// Settings for the database container of a deployment.
    pub fn deployed(
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        port: u16,
    ) -> Self {
        Self {
            host: DEPLOYED_HOST.to_string(),
            port: Some(port),
            database: Some(database.into()),
            username: username.into(),
            password: password.into(),
            charset: DEFAULT_CHARSET.to_string(),
            collation: None,
            raise_on_warnings: true,
        }
    }

    /// Read the deployed settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the deployed settings through `lookup`.
    ///
    /// Every `MYSQL_*` variable must be present. `MYSQL_PORT` must parse as a
    /// port number; it is never replaced by a default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| lookup(key).ok_or_else(|| ConfigError::MissingVar(key.to_string()));

        let database = require(ENV_DATABASE)?;
        let username = require(ENV_USER)?;
        let password = require(ENV_PASSWORD)?;
        let raw_port = require(ENV_PORT)?;
        let port = raw_port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort {
                key: ENV_PORT.to_string(),
                value: raw_port.clone(),
            })?;

        Ok(Self::deployed(database, username, password, port))
    }

    /// Override the host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set an explicit port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Select a database.
    pub fn with_database(mut self, database: impl Into<String>) -> Self {
        self.database = Some(database.into());
        self
    }

    /// Set the credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Toggle strict handling of server warnings.
    pub fn with_raise_on_warnings(mut self, raise: bool) -> Self {
        self.raise_on_warnings = raise;
        self
    }

    /// Build the driver options for this configuration.
    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .charset(&self.charset);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        if let Some(port) = self.port {
            options = options.port(port);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        if let Some(collation) = &self.collation {
            options = options.collation(collation);
        }

        options
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::local()
    }
}

// Passwords stay out of logs.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"***")
            .field("charset", &self.charset)
            .field("collation", &self.collation)
            .field("raise_on_warnings", &self.raise_on_warnings)
            .finish()
    }
}

impl fmt::Display for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = if self.username.is_empty() { "<anonymous>" } else { &self.username };
        write!(f, "{}@{}", user, self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{}", port)?;
        }
        if let Some(database) = &self.database {
            write!(f, "/{}", database)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_local_config() {
        let config = DbConfig::local();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.username, "");
        assert_eq!(config.password, "");
        assert_eq!(config.charset, "utf8mb4");
        assert_eq!(config.collation.as_deref(), Some("utf8mb4_unicode_ci"));
        assert!(config.port.is_none());
        assert!(config.database.is_none());
        assert!(config.raise_on_warnings);
    }

    #[test]
    fn test_deployed_from_lookup() {
        let lookup = lookup_from(&[
            ("MYSQL_DATABASE", "tasks"),
            ("MYSQL_USER", "root"),
            ("MYSQL_PASSWORD", "secret"),
            ("MYSQL_PORT", "3306"),
        ]);

        let config = DbConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.host, "todo-mysql");
        assert_eq!(config.port, Some(3306));
        assert_eq!(config.database.as_deref(), Some("tasks"));
        assert_eq!(config.username, "root");
        assert_eq!(config.password, "secret");
        assert!(config.collation.is_none());
    }

    #[test]
    fn test_missing_port_is_an_error() {
        let lookup = lookup_from(&[
            ("MYSQL_DATABASE", "tasks"),
            ("MYSQL_USER", "root"),
            ("MYSQL_PASSWORD", "secret"),
        ]);

        let err = DbConfig::from_lookup(lookup).unwrap_err();
        assert_eq!(err, ConfigError::MissingVar("MYSQL_PORT".to_string()));
    }

    #[test]
    fn test_non_integer_port_is_an_error() {
        for bad in ["abc", "", "3306.0", "70000", "-1"] {
            let lookup = lookup_from(&[
                ("MYSQL_DATABASE", "tasks"),
                ("MYSQL_USER", "root"),
                ("MYSQL_PASSWORD", "secret"),
                ("MYSQL_PORT", bad),
            ]);

            let err = DbConfig::from_lookup(lookup).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidPort { ref value, .. } if value == bad),
                "unexpected error for {:?}: {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_empty_password_is_allowed() {
        let lookup = lookup_from(&[
            ("MYSQL_DATABASE", "tasks"),
            ("MYSQL_USER", "root"),
            ("MYSQL_PASSWORD", ""),
            ("MYSQL_PORT", "3306"),
        ]);

        let config = DbConfig::from_lookup(lookup).unwrap();
        assert_eq!(config.password, "");
    }

    #[test]
    fn test_variant_parse() {
        assert_eq!("local".parse::<Variant>().unwrap(), Variant::Local);
        assert_eq!(" Deployed ".parse::<Variant>().unwrap(), Variant::Deployed);
        assert!(matches!(
            "staging".parse::<Variant>(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_password_not_printed() {
        let config = DbConfig::deployed("tasks", "root", "secret", 3306);
        assert_eq!(config.to_string(), "root@todo-mysql:3306/tasks");
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
