use anyhow::Result;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rk_jadwal_backend::config::ServerConfig;
use rk_jadwal_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config)?;

    info!("Starting server on {}", config.bind_addr);
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
