//! offcache server entry point.
//!
//! Boots the engine against the configured SQLite store, runs install and
//! activation, then serves the engine as MCP tools on stdio. Logging goes to
//! stderr to avoid interfering with the JSON-RPC protocol on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use offcache_client::{FetchClient, FetchConfig};
use offcache_core::{AppConfig, CacheDb};
use offcache_engine::{Engine, EngineConfig};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let engine_config = EngineConfig::from_app_config(&config).context("resolving engine configuration")?;

    let store = CacheDb::open(&config.db_path)
        .await
        .with_context(|| format!("opening cache at {}", config.db_path.display()))?;
    let network = FetchClient::new(FetchConfig::from(&config)).context("building HTTP client")?;
    let engine = Engine::new(Arc::new(store), Arc::new(network), engine_config);

    let install = engine.on_install().await;
    let activate = engine.on_activate().await;
    tracing::info!(
        seeded = install.stored.len(),
        install_error = install.error.as_deref(),
        pruned = activate.deleted.len(),
        prune_failures = activate.failed.len(),
        "cache ready"
    );

    tracing::info!(db = %config.db_path.display(), origin = %config.origin, "Starting offcache server on stdio transport");

    let handler = handler::OffcacheServer::new(engine.clone());
    let server = serve_server(handler, stdio()).await?;
    server.waiting().await?;

    engine.settle().await;

    Ok(())
}
