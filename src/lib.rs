pub mod api;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;

use std::sync::Arc;
use tokio::signal;

use api::AppState;
pub use config::Config;
use db::Store;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;
    config.validate()?;

    init_tracing(&config.server.log_level);

    info!("nhadat-api v{} starting...", env!("CARGO_PKG_VERSION"));
    match &config.loaded_from {
        Some(path) => info!("Loaded config from: {}", path.display()),
        None => info!("No config file found, using defaults"),
    }

    let store = Store::with_pool_options(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
    )
    .await?;
    store.ping().await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = Arc::new(AppState {
        store,
        config: Arc::new(config),
    });

    let app = api::router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server_handle = tokio::spawn(async move {
        info!("API server running at http://{}", addr);
        if let Err(e) = axum::serve(listener, app).await {
            error!("Server error: {}", e);
        }
    });

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    server_handle.abort();
    info!("Server stopped");

    Ok(())
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
