//! Common error types for the todo API.
//!
//! Configuration and database failures are shared between the `db` crate
//! and the HTTP service so both report them the same way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Configuration errors raised while reading settings from the environment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid port {value:?} in {key}")]
    InvalidPort { key: String, value: String },

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// Database-related errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Error response for API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Add details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&ConfigError> for ErrorResponse {
    fn from(err: &ConfigError) -> Self {
        let (code, message) = match err {
            ConfigError::MissingVar(_) => ("CONFIG_MISSING_VAR", "Missing configuration"),
            ConfigError::InvalidPort { .. } => ("CONFIG_INVALID_PORT", "Invalid port"),
            ConfigError::InvalidValue { .. } => ("CONFIG_INVALID_VALUE", "Invalid configuration value"),
        };
        Self::new(code, message).with_details(err.to_string())
    }
}

impl From<&DatabaseError> for ErrorResponse {
    fn from(err: &DatabaseError) -> Self {
        match err {
            DatabaseError::ConnectionFailed(reason) => {
                Self::new("DB_CONNECTION_FAILED", "Database connection failed")
                    .with_details(reason.clone())
            }
            DatabaseError::QueryFailed(reason) => {
                Self::new("DB_QUERY_FAILED", "Database query failed").with_details(reason.clone())
            }
            DatabaseError::Config(config) => config.into(),
        }
    }
}

impl From<&AppError> for ErrorResponse {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::Config(config) => config.into(),
            AppError::Database(db) => db.into(),
        }
    }
}
