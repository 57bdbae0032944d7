//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Page API reachable
//!
//! # Customer pages (HTML, `?slug=` overrides the configured slug)
//! GET  /                           - Homepage
//! GET  /shop                       - Shop
//! GET  /cart                       - Cart
//! GET  /checkout                   - Checkout
//! GET  /order-success              - Order confirmation
//! GET  /about                      - About
//! GET  /contact                    - Contact
//! GET  /privacy                    - Privacy policy
//! GET  /terms                      - Terms of service
//! GET  /p/{slug}                   - Custom page by slug
//!
//! # Admin (JSON)
//! GET  /admin/page-config          - Saved role bindings
//! PUT  /admin/page-config          - Replace role bindings
//! GET  /admin/templates/{role}     - Default template for a role
//! GET  /admin/builder/{role}       - Tree to open in the page builder
//! PUT  /admin/pages/{slug}         - Save a page document
//! ```

pub mod admin;
pub mod pages;

use axum::{Router, extract::State, http::StatusCode, routing::get};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the page API does not answer.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.pages().client().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Page API not reachable");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(pages::router())
        .nest("/admin", admin::router())
}
