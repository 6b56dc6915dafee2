//! Isvaryam assistant server entry point

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use isvaryam_catalog::{CatalogStore, InMemoryCatalog};
use isvaryam_config::{load_settings, Settings};
use isvaryam_server::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var("ISVARYAM_ENV").ok();
    let settings = match load_settings(env.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            // Tracing not yet initialized, use eprintln for early logging
            eprintln!("Warning: failed to load config: {}. Using defaults.", e);
            Settings::default()
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = env.as_deref().unwrap_or("default"),
        "Starting Isvaryam catalog assistant"
    );

    let catalog = build_catalog(&settings);
    let state = AppState::with_catalog(settings.clone(), catalog);
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

/// Catalog from data files when present, otherwise the built-in seed
fn build_catalog(settings: &Settings) -> Arc<dyn CatalogStore> {
    let products = Path::new(&settings.data_dir).join("products.json");
    let reviews = Path::new(&settings.data_dir).join("reviews.json");
    if products.exists() && reviews.exists() {
        match InMemoryCatalog::from_json_files(&products, &reviews) {
            Ok(catalog) => {
                tracing::info!(dir = %settings.data_dir, "Loaded catalog from data files");
                return Arc::new(catalog);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load catalog files, using seed data");
            }
        }
    }
    Arc::new(InMemoryCatalog::seed())
}
