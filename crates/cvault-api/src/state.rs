//! Application state.

use std::sync::Arc;

use cvault_catalog::{Catalog, CatalogConfig};
use cvault_storage::{ObjectStore, S3Store};

use crate::auth::TokenAuth;
use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub catalog: Arc<Catalog>,
    pub auth: Arc<TokenAuth>,
}

impl AppState {
    /// Create application state against the S3 store from the environment.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = Arc::new(S3Store::from_env()?);
        Ok(Self::with_store(config, store))
    }

    /// Create application state over any object store (tests use the
    /// in-memory backend here).
    pub fn with_store(config: ApiConfig, store: Arc<dyn ObjectStore>) -> Self {
        let catalog = Catalog::new(
            store,
            CatalogConfig {
                public_origin: config.public_origin.clone(),
                on_collision: config.on_collision,
            },
        );
        let auth = TokenAuth::from_env(&config.jwt_secret, config.jwt_expiry_hours);

        Self {
            config,
            catalog: Arc::new(catalog),
            auth: Arc::new(auth),
        }
    }
}
