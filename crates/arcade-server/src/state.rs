use std::sync::Arc;

use arcade_core::catalog::Catalog;

use crate::config::ServerConfig;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let catalog = config.load_catalog();
        Self::with_catalog(config, catalog)
    }

    pub fn with_catalog(config: ServerConfig, catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            config: Arc::new(config),
        }
    }
}
