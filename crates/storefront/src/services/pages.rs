//! Page resolution flow.
//!
//! One lookup runs strictly in order and shares nothing with other lookups:
//!
//! ```text
//! load PageConfig ─► resolve slug ─► fetch ─► (retry once on Error) ─► Resolution
//! ```
//!
//! The render decision itself is made by [`hostfront_core::render`].

use std::sync::Arc;
use std::time::Duration;

use hostfront_core::{PageConfig, PageRole, Resolution, Slug, resolve_configured};
use secrecy::SecretString;
use tracing::instrument;

use crate::backend::PageClient;
use crate::config::PagesApiConfig;
use crate::store::{ConfigStore, StoreError};

/// The slug that was looked up and what the backend said about it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLookup {
    /// `None` when there was neither a role nor an explicit slug.
    pub slug: Option<Slug>,
    pub resolution: Resolution,
}

/// Resolves pages for routes.
#[derive(Clone)]
pub struct PageService {
    store: Arc<dyn ConfigStore>,
    client: PageClient,
    retry_delay: Option<Duration>,
}

impl PageService {
    #[must_use]
    pub fn new(store: Arc<dyn ConfigStore>, client: PageClient, config: &PagesApiConfig) -> Self {
        Self {
            store,
            client,
            retry_delay: config.retry_on_error.then_some(config.retry_delay),
        }
    }

    #[must_use]
    pub const fn client(&self) -> &PageClient {
        &self.client
    }

    /// The saved configuration, or an empty one.
    ///
    /// The store is read on the blocking pool.
    pub async fn page_config(&self) -> PageConfig {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || store.load()).await {
            Ok(config) => config.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Page configuration load task failed");
                PageConfig::default()
            }
        }
    }

    /// Replace the saved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot write the document.
    pub async fn save_page_config(&self, config: PageConfig) -> Result<(), StoreError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.save(&config)).await?
    }

    /// Work out which slug a request should fetch.
    pub async fn resolve_slug(
        &self,
        role: Option<PageRole>,
        explicit: Option<&Slug>,
    ) -> Option<Slug> {
        if explicit.is_some() {
            return explicit.cloned();
        }
        resolve_configured(role, None, &self.page_config().await)
    }

    /// Run the full lookup for a request.
    #[instrument(skip(self, token), fields(role = ?role, explicit = ?explicit.map(Slug::as_str)))]
    pub async fn lookup(
        &self,
        role: Option<PageRole>,
        explicit: Option<&Slug>,
        token: Option<&SecretString>,
    ) -> PageLookup {
        let Some(slug) = self.resolve_slug(role, explicit).await else {
            tracing::debug!("Nothing to resolve");
            return PageLookup {
                slug: None,
                resolution: Resolution::Error("no role or slug given".to_string()),
            };
        };

        let resolution = self.fetch(&slug, token).await;
        tracing::debug!(slug = %slug, outcome = resolution.label(), "Page resolved");

        PageLookup {
            slug: Some(slug),
            resolution,
        }
    }

    /// Fetch a slug, retrying once after a transport or server error.
    pub async fn fetch(&self, slug: &Slug, token: Option<&SecretString>) -> Resolution {
        let first = self.client.fetch(slug, token).await;

        match (&first, self.retry_delay) {
            (Resolution::Error(reason), Some(delay)) => {
                tracing::warn!(slug = %slug, reason = %reason, "Retrying page fetch");
                tokio::time::sleep(delay).await;
                self.client.fetch(slug, token).await
            }
            _ => first,
        }
    }
}
