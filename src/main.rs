mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;
mod words;

use anyhow::Context;
use config::{Backend, Config};
use state::AppState;
use std::sync::Arc;
use store::{KvStore, MemoryStore, RedisStore};
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("redis-word-kv starting");

    let config = Config::from_env()?;
    config.log_startup();

    let store: Arc<dyn KvStore> = match config.backend {
        Backend::Redis => Arc::new(RedisStore::from_config(&config)?),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };
    let state = AppState::new(store);

    // A store that is down at startup is not fatal; the list is seeded on first use
    match state.words.initialize().await {
        Ok(true) => tracing::info!("Word list initialized"),
        Ok(false) => tracing::info!("Word list already present"),
        Err(e) => tracing::warn!("Could not initialize word list, serving fallback words: {:#}", e),
    }

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    tracing::info!("redis-word-kv stopped");
    Ok(())
}

// Resolves on SIGINT or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
