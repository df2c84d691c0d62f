//! geoprov server entry point.
//!
//! Boots the HTTP route layer over the dataset provider and schedules the
//! cache retention sweep: once at startup, then daily.

use anyhow::Result;
use geoprov_client::DatasetProvider;
use geoprov_core::AppConfig;
use tracing_subscriber::EnvFilter;

mod error;
mod routes;

/// Interval between retention sweeps.
const SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load()?;
    let provider = DatasetProvider::from_config(&config)?;

    let sweeper = provider.cache().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            // first tick fires immediately: startup sweep
            interval.tick().await;
            if let Err(e) = sweeper.sweep().await {
                tracing::error!(error = %e, "retention sweep failed");
            }
        }
    });

    let app = routes::router(provider);
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "starting geoprov server");
    axum::serve(listener, app).await?;

    Ok(())
}
