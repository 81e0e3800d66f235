//! SKU Sync Server
//!
//! Serves the update-by-SKU endpoint over HTTP.

use anyhow::Context;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sku_sync_server::{
    config::{AppConfig, CatalogBackend},
    create_router,
    repository::{memory::MemoryCatalog, CatalogStore, Repository},
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("sku_sync_server={},tower_http=debug", config.logging.level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting SKU Sync Server v{}", env!("CARGO_PKG_VERSION"));

    // Create the catalog store
    let store: Arc<dyn CatalogStore> = match config.catalog.backend {
        CatalogBackend::Postgres => Arc::new(
            Repository::connect(&config.database)
                .await
                .context("Failed to connect to database")?,
        ),
        CatalogBackend::Memory => match &config.catalog.seed_file {
            Some(path) => Arc::new(MemoryCatalog::from_seed_file(path).await?),
            None => Arc::new(MemoryCatalog::new()),
        },
    };

    store
        .ping()
        .await
        .context("Catalog store is not ready")?;

    tracing::info!("Catalog store ready ({:?} backend)", config.catalog.backend);

    let addr = SocketAddr::new(
        config.server.host.parse().context("Invalid host address")?,
        config.server.port,
    );

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(Services::new(store)),
    };

    // Build router
    let app = create_router(state.clone());

    tracing::info!(
        "Server listening on http://{} (update route: {})",
        addr,
        state.config.update_route()
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
