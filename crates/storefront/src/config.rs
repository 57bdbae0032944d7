//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `PAGES_API_URL` - Base URL of the backend REST API serving `/pages/{slug}`
//!
//! ## Optional
//! - `HOSTFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `HOSTFRONT_PORT` - Listen port (default: 3000)
//! - `PAGES_API_TOKEN` - Service bearer token, used when a request carries none
//! - `ADMIN_API_TOKEN` - Token `PUT /admin/page-config` must present; without it
//!   any bearer token is accepted and the admin routes are expected to sit
//!   behind the billing panel's own login
//! - `PAGE_CONFIG_PATH` - Page configuration document (default: data/default_page_config.json)
//! - `PAGES_REQUEST_TIMEOUT_SECS` - Backend request timeout (default: 10)
//! - `PAGES_RETRY_ON_ERROR` - Retry a failed page read once (default: true)
//! - `PAGES_RETRY_DELAY_MS` - Pause before that retry (default: 250)
//! - `SITE_NAME` - Name shown in fallback pages (default: Hostfront)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Name shown in fallback pages and titles
    pub site_name: String,
    /// Where the admin's page configuration is persisted
    pub page_config_path: PathBuf,
    /// Backend page API configuration
    pub pages: PagesApiConfig,
    /// Token required to change the page configuration
    pub admin_token: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

/// Backend page API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct PagesApiConfig {
    /// Base URL; page paths are appended to it
    pub base_url: Url,
    /// Service token used when the incoming request has none
    pub token: Option<SecretString>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Retry a failed read once before giving up
    pub retry_on_error: bool,
    /// Pause before the retry
    pub retry_delay: Duration,
}

impl std::fmt::Debug for PagesApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagesApiConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("retry_on_error", &self.retry_on_error)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("HOSTFRONT_HOST", "127.0.0.1")?;
        let port = parse_env("HOSTFRONT_PORT", "3000")?;
        let site_name = get_env_or_default("SITE_NAME", "Hostfront");
        let page_config_path = PathBuf::from(get_env_or_default(
            "PAGE_CONFIG_PATH",
            "data/default_page_config.json",
        ));

        let pages = PagesApiConfig::from_env()?;

        Ok(Self {
            host,
            port,
            site_name,
            page_config_path,
            pages,
            admin_token: get_optional_env("ADMIN_API_TOKEN")
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_env("SENTRY_SAMPLE_RATE", "1.0")?,
            sentry_traces_sample_rate: parse_env("SENTRY_TRACES_SAMPLE_RATE", "0.0")?,
        })
    }

    /// Settings for the given backend with defaults for everything else.
    #[must_use]
    pub fn with_pages(pages: PagesApiConfig) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            site_name: "Hostfront".to_string(),
            page_config_path: PathBuf::from("data/default_page_config.json"),
            pages,
            admin_token: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl PagesApiConfig {
    /// Load the backend settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `PAGES_API_URL` is missing or not a base URL,
    /// or a numeric setting fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_required_env("PAGES_API_URL")?;
        let base_url = parse_base_url(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("PAGES_API_URL".to_string(), e))?;

        Ok(Self {
            base_url,
            token: get_optional_env("PAGES_API_TOKEN")
                .filter(|t| !t.is_empty())
                .map(SecretString::from),
            timeout: Duration::from_secs(parse_env("PAGES_REQUEST_TIMEOUT_SECS", "10")?),
            retry_on_error: parse_env("PAGES_RETRY_ON_ERROR", "true")?,
            retry_delay: Duration::from_millis(parse_env("PAGES_RETRY_DELAY_MS", "250")?),
        })
    }

    /// Settings for a backend at `base_url` with defaults for the rest.
    ///
    /// # Errors
    ///
    /// Returns a message if `base_url` cannot be used as a base URL.
    pub fn new(base_url: &str) -> Result<Self, String> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            token: None,
            timeout: Duration::from_secs(10),
            retry_on_error: true,
            retry_delay: Duration::from_millis(250),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL, making sure relative joins keep its path.
fn parse_base_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err(format!("{raw} cannot be used as a base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an environment variable, falling back to a default.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let url = parse_base_url("https://api.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/v1/");
        assert_eq!(url.join("pages/home").unwrap().path(), "/v1/pages/home");
    }

    #[test]
    fn test_base_url_rejects_non_base() {
        assert!(parse_base_url("mailto:ops@example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut config =
            StorefrontConfig::with_pages(PagesApiConfig::new("http://localhost:8080").unwrap());
        config.host = "127.0.0.1".parse().unwrap();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_pages_config_debug_redacts_token() {
        let mut config = PagesApiConfig::new("http://localhost:8080").unwrap();
        config.token = Some(SecretString::from("super_secret_service_token"));

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("localhost:8080"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_service_token"));
    }
}
