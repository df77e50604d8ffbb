use catalog::Catalog;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod routes;

use config::{Args, ServerConfig};
use routes::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ServerConfig::from_env(Args::parse())?;

    // The catalog is read once; the server never starts without it.
    let catalog = match Catalog::load(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("catalog load failed: {:?} -> {err}", config.catalog_path);
            return Err(err.into());
        }
    };
    info!(
        "catalog {} loaded: {} tiles, origin ({}, {}, {})",
        catalog.area_name,
        catalog.len(),
        catalog.origin.lat_deg,
        catalog.origin.lon_deg,
        catalog.origin.alt_m
    );

    let state = AppState::new(catalog, &config);
    let app = routes::router(state, &config.public_root);

    info!("model server listening on http://{}", config.addr);
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
