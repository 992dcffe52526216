//! order-service binary
//!
//! Connects to PostgreSQL (fatal on failure) and Redis (lazy, never fatal),
//! then serves the HTTP API until SIGINT or SIGTERM.

use std::sync::Arc;

use order_service::cache::RedisCache;
use order_service::db::PgOrderStore;
use order_service::server::shutdown_signal;
use order_service::{AppState, Config, OrderServer};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "order_service=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env();

    tracing::info!(
        "Starting order-service v{} (db: {}:{}/{}, redis: {}:{})",
        env!("CARGO_PKG_VERSION"),
        config.db_host,
        config.db_port,
        config.db_name,
        config.redis_host,
        config.redis_port
    );

    let store = PgOrderStore::connect(&config).await.map_err(|e| {
        tracing::error!("Failed to connect to database: {e}");
        e
    })?;
    tracing::info!("Connected to PostgreSQL");

    let cache = RedisCache::new(&config.redis_url())?;
    let state = AppState::new(&config, Arc::new(store.clone()), Arc::new(cache));

    // Redis is optional at startup; reads fall back to the database
    let connectivity = state.orders.health().await;
    if connectivity.cache {
        tracing::info!("Connected to Redis");
    } else {
        tracing::warn!("Redis not reachable, serving from database until it is");
    }

    let server = OrderServer::start(&config, state).await?;

    shutdown_signal().await;

    server.stop().await?;
    store.close().await;

    Ok(())
}
