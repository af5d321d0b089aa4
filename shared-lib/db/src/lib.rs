//! MySQL connection provider for the todo API.
//!
//! Settings come either from literal local defaults or from `MYSQL_*`
//! environment variables, and each request opens its own connection.

mod config;
mod connection;
mod provider;

#[cfg(test)]
mod test_logs;

pub use config::{
    DbConfig, Variant, DEFAULT_CHARSET, DEPLOYED_HOST, ENV_DATABASE, ENV_PASSWORD, ENV_PORT,
    ENV_USER, LOCAL_COLLATION, LOCAL_HOST,
};
pub use connection::{connect, health_check, is_connected, DbConnection};
pub use provider::ConnectionProvider;
