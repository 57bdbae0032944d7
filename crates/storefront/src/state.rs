//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{BackendError, PageClient};
use crate::config::StorefrontConfig;
use crate::services::PageService;
use crate::store::{ConfigStore, FileConfigStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the page service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pages: PageService,
}

impl AppState {
    /// Create application state backed by the configured file store.
    ///
    /// # Errors
    ///
    /// Returns an error if the page API client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, BackendError> {
        let store = Arc::new(FileConfigStore::new(config.page_config_path.clone()));
        Self::with_store(config, store)
    }

    /// Create application state with an explicit configuration store.
    ///
    /// # Errors
    ///
    /// Returns an error if the page API client cannot be built.
    pub fn with_store(
        config: StorefrontConfig,
        store: Arc<dyn ConfigStore>,
    ) -> Result<Self, BackendError> {
        let client = PageClient::new(&config.pages)?;
        let pages = PageService::new(store, client, &config.pages);

        Ok(Self {
            inner: Arc::new(AppStateInner { config, pages }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the page resolution service.
    #[must_use]
    pub fn pages(&self) -> &PageService {
        &self.inner.pages
    }
}
