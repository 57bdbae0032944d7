//! Hostfront storefront library.
//!
//! Serves customer pages built from stored component trees, falling back to
//! per-role default templates, plus the admin endpoints that manage them.
//! Exposed as a library so the binary, the CLI and the integration tests
//! share one router.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod views;

use std::path::Path;

use axum::Router;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

/// Build the full application router.
///
/// Static assets are served from `static_dir` under `/static`.
pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
