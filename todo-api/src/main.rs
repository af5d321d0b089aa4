use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_api::{build_router, ApiConfig, AppContext};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_api=info,db=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = ApiConfig::from_env()?;
    tracing::info!("Starting Todo API v{}", config.version);
    tracing::info!("Database variant: {}", config.db_variant);

    let addr = config.bind_addr.clone();
    let app = build_router(AppContext::new(config));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
