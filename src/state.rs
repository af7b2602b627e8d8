use std::sync::Arc;

use crate::{
    config::AppConfig,
    dao::{memory::MemoryBracketStore, store::BracketStore},
};

pub type SharedState = Arc<AppState>;

/// Central application state storing configuration and the bracket store handle.
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn BracketStore>,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    ///
    /// Brackets are kept in the in-memory backend.
    pub fn new(config: AppConfig) -> SharedState {
        Self::with_store(config, Arc::new(MemoryBracketStore::new()))
    }

    /// Construct an [`AppState`] on top of a specific store backend.
    pub fn with_store(config: AppConfig, store: Arc<dyn BracketStore>) -> SharedState {
        Arc::new(Self { config, store })
    }

    /// Obtain a handle to the bracket store.
    pub fn store(&self) -> Arc<dyn BracketStore> {
        self.store.clone()
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
