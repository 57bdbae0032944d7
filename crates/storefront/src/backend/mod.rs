//! Client for the backend page API.
//!
//! # Endpoints
//!
//! ```text
//! GET /pages/{slug}   - Read a page document (404 = no such page)
//! PUT /pages/{slug}   - Replace a page document wholesale
//! ```
//!
//! Requests carry `Authorization: Bearer <token>` when a token is known:
//! the caller's own token first, then the configured service token. Public
//! pages are readable without either.

use std::sync::Arc;

use hostfront_core::{PageDocument, Resolution, Slug};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use crate::config::PagesApiConfig;

/// Errors that can occur when talking to the page API.
#[derive(Debug, Error)]
pub enum BackendError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body was not a page document.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The configured base URL cannot carry a page path.
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Client for reading and writing page documents.
///
/// Cheaply cloneable; clones share one connection pool.
#[derive(Clone)]
pub struct PageClient {
    inner: Arc<PageClientInner>,
}

struct PageClientInner {
    client: reqwest::Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl PageClient {
    /// Create a new page API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &PagesApiConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("hostfront/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(PageClientInner {
                client,
                base_url: config.base_url.clone(),
                token: config.token.clone(),
            }),
        })
    }

    /// Fetch a page and classify the outcome.
    ///
    /// A missing page is [`Resolution::NotFound`]; every other failure is
    /// logged and returned as [`Resolution::Error`].
    #[instrument(skip(self, token), fields(slug = %slug))]
    pub async fn fetch(&self, slug: &Slug, token: Option<&SecretString>) -> Resolution {
        match self.get_page(slug, token).await {
            Ok(Some(doc)) => Resolution::Found(doc),
            Ok(None) => {
                tracing::debug!("No stored page");
                Resolution::NotFound
            }
            Err(e) => {
                tracing::error!(error = %e, "Page fetch failed");
                Resolution::Error(e.to_string())
            }
        }
    }

    /// Read a page document.
    ///
    /// Returns `Ok(None)` for a 404 or 410 response.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, any other non-success
    /// status, or a body that is not a page document.
    pub async fn get_page(
        &self,
        slug: &Slug,
        token: Option<&SecretString>,
    ) -> Result<Option<PageDocument>, BackendError> {
        let url = self.page_url(slug)?;
        let response = self
            .authorize(self.inner.client.get(url), token)
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return Ok(None);
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        let doc = serde_json::from_str::<PageDocument>(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse page document"
            );
            BackendError::Parse(e.to_string())
        })?;

        Ok(Some(doc))
    }

    /// Replace a page document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API rejects the write.
    #[instrument(skip(self, doc, token), fields(slug = %doc.slug))]
    pub async fn put_page(
        &self,
        doc: &PageDocument,
        token: Option<&SecretString>,
    ) -> Result<(), BackendError> {
        let url = self.page_url(&doc.slug)?;
        let response = self
            .authorize(self.inner.client.put(url), token)
            .json(doc)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, "Page write rejected");
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: message.chars().take(200).collect(),
            });
        }

        tracing::info!(components = doc.components.len(), "Page saved");
        Ok(())
    }

    /// Check that the backend answers at all.
    ///
    /// # Errors
    ///
    /// Returns an error if no HTTP response comes back.
    pub async fn ping(&self) -> Result<(), BackendError> {
        self.inner
            .client
            .head(self.inner.base_url.clone())
            .send()
            .await?;
        Ok(())
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
        token: Option<&SecretString>,
    ) -> reqwest::RequestBuilder {
        match token.or(self.inner.token.as_ref()) {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    fn page_url(&self, slug: &Slug) -> Result<Url, BackendError> {
        let mut url = self.inner.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .push("pages")
            .push(slug.as_str());
        Ok(url)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> PageClient {
        PageClient::new(&PagesApiConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn test_page_url_appends_to_base_path() {
        let slug = Slug::parse("order-success").unwrap();
        assert_eq!(
            client("https://api.example.com/v1").page_url(&slug).unwrap().as_str(),
            "https://api.example.com/v1/pages/order-success"
        );
        assert_eq!(
            client("https://api.example.com").page_url(&slug).unwrap().as_str(),
            "https://api.example.com/pages/order-success"
        );
    }

    #[test]
    fn test_backend_error_display() {
        let err = BackendError::Api {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API error: 503 - maintenance");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_error_not_missing() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = client("http://127.0.0.1:9");
        let outcome = client.fetch(&Slug::parse("home").unwrap(), None).await;
        assert!(outcome.is_error());
    }
}
