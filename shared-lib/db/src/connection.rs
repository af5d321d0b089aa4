//! Single MySQL connections.
//!
//! Every call opens a new connection and hands it to the caller. Nothing is
//! pooled or reused, and there is no retry or timeout beyond the driver's.

use sqlx::mysql::MySqlConnection;
use sqlx::{ConnectOptions, Connection};

use crate::config::DbConfig;
use error::DatabaseError;

/// An open connection owned by the caller.
pub type DbConnection = MySqlConnection;

// Strict mode turns data-change warnings (truncation, invalid values) into
// errors. Other warnings are still only reported.
const STRICT_SESSION_SQL: &str =
    "SET SESSION sql_mode = CONCAT_WS(',', NULLIF(@@SESSION.sql_mode, ''), 'STRICT_ALL_TABLES')";

/// Open a connection using `config`.
pub async fn connect(config: &DbConfig) -> Result<DbConnection, DatabaseError> {
    tracing::info!("Opening database connection: {}", config);

    let mut conn = config.connect_options().connect().await.map_err(|e| {
        tracing::error!("Failed to connect to database {}: {}", config, e);
        DatabaseError::ConnectionFailed(e.to_string())
    })?;

    if config.raise_on_warnings {
        if let Err(e) = sqlx::query(STRICT_SESSION_SQL).execute(&mut conn).await {
            tracing::error!("Failed to enable strict mode on {}: {}", config, e);
            // The handle is discarded either way.
            let _ = conn.close().await;
            return Err(DatabaseError::ConnectionFailed(e.to_string()));
        }
    }

    tracing::debug!("Database connection to {} established", config);
    Ok(conn)
}

/// Check whether the server still answers on `conn`.
pub async fn is_connected(conn: &mut DbConnection) -> bool {
    conn.ping().await.is_ok()
}

/// Open a connection, run a trivial query and close it again.
pub async fn health_check(config: &DbConfig) -> Result<(), DatabaseError> {
    let mut conn = connect(config).await?;

    sqlx::query("SELECT 1")
        .execute(&mut conn)
        .await
        .map_err(|e| {
            tracing::error!("Health check query on {} failed: {}", config, e);
            DatabaseError::QueryFailed(e.to_string())
        })?;

    conn.close()
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;
    Ok(())
}
