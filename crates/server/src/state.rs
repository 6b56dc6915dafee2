//! Shared application state

use std::sync::Arc;

use isvaryam_agent::CatalogAgent;
use isvaryam_catalog::{CatalogStore, InMemoryCatalog};
use isvaryam_config::Settings;

/// State shared across request handlers
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub agent: Arc<CatalogAgent>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let catalog: Arc<dyn CatalogStore> = Arc::new(InMemoryCatalog::seed());
        Self::with_catalog(settings, catalog)
    }

    /// Build with an explicit catalog store, used when products come
    /// from data files or an external store
    pub fn with_catalog(settings: Settings, catalog: Arc<dyn CatalogStore>) -> Self {
        let agent = Arc::new(CatalogAgent::with_random_selector(&settings, catalog));
        Self {
            settings: Arc::new(settings),
            agent,
        }
    }
}
