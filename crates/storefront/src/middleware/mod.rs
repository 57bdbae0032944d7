//! HTTP middleware and extractors for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing)
//!
//! Extractors:
//! - [`ClientToken`] - the caller's API token, forwarded to the page API

pub mod client_token;

pub use client_token::{ClientToken, TOKEN_COOKIE};
