//! Integration test harness for Hostfront.
//!
//! [`MockPageApi`] serves `/pages/{slug}` from memory on an ephemeral port
//! and records what it was asked, so tests can drive the real page client,
//! the page service and the full router against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p hostfront-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::get,
};
use hostfront_storefront::config::{PagesApiConfig, StorefrontConfig};
use hostfront_storefront::state::AppState;
use hostfront_storefront::store::MemoryConfigStore;
use serde_json::Value;
use tokio::net::TcpListener;

#[derive(Default)]
struct MockState {
    pages: Mutex<HashMap<String, Value>>,
    /// Raw bodies served with 200, for malformed-document tests.
    raw: Mutex<HashMap<String, String>>,
    /// Status to answer with, and how many more times.
    failures: Mutex<HashMap<String, (StatusCode, usize)>>,
    hits: AtomicUsize,
    auth: Mutex<Vec<Option<String>>>,
}

/// An in-process page API.
pub struct MockPageApi {
    base_url: String,
    state: Arc<MockState>,
}

impl MockPageApi {
    /// Start serving on `127.0.0.1` at a free port.
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new()
            .route("/", get(|| async { StatusCode::OK }))
            .route("/pages/{slug}", get(get_page).put(put_page))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Store a page document under `slug`.
    pub fn insert_page(&self, slug: &str, doc: Value) {
        self.state
            .pages
            .lock()
            .unwrap()
            .insert(slug.to_string(), doc);
    }

    /// Serve `body` verbatim with a 200 for `slug`.
    pub fn insert_raw(&self, slug: &str, body: &str) {
        self.state
            .raw
            .lock()
            .unwrap()
            .insert(slug.to_string(), body.to_string());
    }

    /// Answer the next `times` reads of `slug` with `status`.
    pub fn fail(&self, slug: &str, status: StatusCode, times: usize) {
        self.state
            .failures
            .lock()
            .unwrap()
            .insert(slug.to_string(), (status, times));
    }

    /// The stored document for `slug`, including ones written through PUT.
    #[must_use]
    pub fn page(&self, slug: &str) -> Option<Value> {
        self.state.pages.lock().unwrap().get(slug).cloned()
    }

    /// Number of page requests seen, reads and writes.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    /// `Authorization` header of every page request, in order.
    #[must_use]
    pub fn auth_headers(&self) -> Vec<Option<String>> {
        self.state.auth.lock().unwrap().clone()
    }

    /// Client settings pointing here, with a short retry delay.
    #[must_use]
    pub fn pages_config(&self) -> PagesApiConfig {
        let mut config = PagesApiConfig::new(&self.base_url).unwrap();
        config.timeout = Duration::from_secs(5);
        config.retry_delay = Duration::from_millis(10);
        config
    }

    /// Application state backed by this API and `store`.
    #[must_use]
    pub fn app_state(&self, store: Arc<MemoryConfigStore>) -> AppState {
        AppState::with_store(StorefrontConfig::with_pages(self.pages_config()), store).unwrap()
    }
}

fn record(state: &MockState, headers: &HeaderMap) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let auth = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.auth.lock().unwrap().push(auth);
}

async fn get_page(
    State(state): State<Arc<MockState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&state, &headers);

    if let Some((status, remaining)) = state.failures.lock().unwrap().get_mut(&slug)
        && *remaining > 0
    {
        *remaining -= 1;
        return (*status, "backend failure").into_response();
    }

    if let Some(body) = state.raw.lock().unwrap().get(&slug) {
        return (StatusCode::OK, body.clone()).into_response();
    }

    match state.pages.lock().unwrap().get(&slug) {
        Some(doc) => Json(doc.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn put_page(
    State(state): State<Arc<MockState>>,
    Path(slug): Path<String>,
    headers: HeaderMap,
    Json(doc): Json<Value>,
) -> StatusCode {
    record(&state, &headers);
    state.pages.lock().unwrap().insert(slug, doc);
    StatusCode::NO_CONTENT
}

/// A base URL nothing listens on.
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
