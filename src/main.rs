// src/main.rs
use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use inventory_catalog::config::{Config, StoreBackend};
use inventory_catalog::database;
use inventory_catalog::routes;
use inventory_catalog::state::AppState;
use inventory_catalog::store::{MemoryProductStore, PgProductStore, ProductStore};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error=%e, "Invalid configuration");
            return;
        }
    };

    // Create the product store
    let store: Arc<dyn ProductStore> = match config.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory product store; data is lost on exit");
            Arc::new(MemoryProductStore::new())
        }
        StoreBackend::Postgres => {
            let database_url = config.database_url.as_deref().unwrap_or_default();
            let db_pool = match database::create_pool(database_url, config.max_connections).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!(error=%e, "Failed to create database pool");
                    return;
                }
            };
            if config.schema_bootstrap {
                if let Err(e) = database::bootstrap_schema(&db_pool).await {
                    tracing::error!(error=%e, "Failed to bootstrap schema");
                    return;
                }
            }
            Arc::new(PgProductStore::new(db_pool))
        }
    };

    let app = routes::build_app(AppState::new(store));

    // Try base_port..base_port+20 to avoid crash when address is in use
    let (host, base_port) = (config.host, config.port);
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}
