mod config;
mod db;
mod error;
mod game;
mod models;
mod routes;
mod services;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use config::Config;
use db::{MemoryStore, PgStore, Store};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn Store>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "memory_game=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Memory game server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let store = create_store(&config).await?;

    let state = Arc::new(AppState {
        config: config.clone(),
        store,
    });

    let mut app = Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if config.server.cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Connect to PostgreSQL when a database is configured, otherwise keep
/// everything in memory
async fn create_store(config: &Config) -> Result<Arc<dyn Store>> {
    let Some(database) = &config.database else {
        tracing::warn!("DATABASE_URL not set, games will only be kept in memory");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let pool = db::create_pool(&database.url, database.max_connections).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database migrations completed");

    Ok(Arc::new(PgStore::new(pool)))
}
