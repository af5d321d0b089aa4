//! Application bootstrap.
//!
//! Builds the HTTP router around an explicitly constructed [`AppContext`].
//! Every response carries a permissive CORS policy so browser clients on any
//! origin can call the API.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use db::ConnectionProvider;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared state handed to every request handler.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Arc<ApiConfig>,
    pub db: Arc<ConnectionProvider>,
}

impl AppContext {
    /// Context whose provider follows the configured variant.
    pub fn new(config: ApiConfig) -> Self {
        let db = ConnectionProvider::new(config.db_variant);
        Self::with_provider(config, db)
    }

    /// Context with a specific connection provider.
    pub fn with_provider(config: ApiConfig, db: ConnectionProvider) -> Self {
        Self {
            config: Arc::new(config),
            db: Arc::new(db),
        }
    }
}

/// Create CORS layer with permissive settings
pub fn create_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the router for the API.
pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/health/db", get(db_health))
        .with_state(ctx)
        .layer(create_cors())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: String,
}

async fn health(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: ctx.config.version.clone(),
    })
}

#[derive(Debug, Serialize)]
struct DbHealthResponse {
    status: &'static str,
    database: &'static str,
}

async fn db_health(State(ctx): State<AppContext>) -> Result<Json<DbHealthResponse>, ApiError> {
    ctx.db.health_check().await?;
    Ok(Json(DbHealthResponse {
        status: "ok",
        database: "reachable",
    }))
}
