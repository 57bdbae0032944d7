//! Customer-facing page routes.
//!
//! Each role route resolves its slug, fetches the stored document and hands
//! the outcome to [`hostfront_core::render`]. A stored tree is rendered as
//! is, a missing page gets the role's default template, and a backend
//! failure gets the route's own fallback UI. Every response names where its
//! content came from in the `x-page-source` header.

use askama::Template;
use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use hostfront_core::{
    ComponentTree, PageRole, RenderSource, Rendered, Slug, render, render_unassigned,
};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::middleware::ClientToken;
use crate::services::PageLookup;
use crate::state::AppState;
use crate::views::{FallbackTemplate, PageTemplate, render_tree};

/// Response header naming the content source.
pub const PAGE_SOURCE_HEADER: &str = "x-page-source";

/// Query parameters accepted by every role route.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    /// Explicit slug, overriding configuration.
    pub slug: Option<String>,
}

/// Copy for a route's own fallback UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fallback {
    pub title: String,
    pub message: String,
    pub cta_label: String,
    pub cta_href: String,
}

impl Fallback {
    fn new(title: &str, message: &str, cta_label: &str, cta_href: &str) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            cta_label: cta_label.to_string(),
            cta_href: cta_href.to_string(),
        }
    }

    /// The fallback shown when `role`'s page cannot be loaded.
    #[must_use]
    pub fn for_role(role: PageRole) -> Self {
        match role {
            PageRole::Cart => Self::new(
                "Your cart is unavailable",
                "We could not load your cart right now. Your items are safe, please try again in a moment.",
                "Continue shopping",
                "/shop",
            ),
            PageRole::Checkout => Self::new(
                "Checkout is unavailable",
                "We could not load checkout right now. Nothing has been charged.",
                "Back to cart",
                "/cart",
            ),
            PageRole::OrderSuccess => Self::new(
                "Thank you for your order",
                "Your order was received. A confirmation is on its way to your email.",
                "Continue shopping",
                "/shop",
            ),
            PageRole::Homepage | PageRole::Shop => Self::new(
                "We will be right back",
                "This page is temporarily unavailable. Please try again shortly.",
                "Try again",
                "/",
            ),
            PageRole::About | PageRole::Contact | PageRole::Privacy | PageRole::Terms => {
                Self::new(
                    "Page unavailable",
                    "This page could not be loaded right now. Please try again shortly.",
                    "Go home",
                    "/",
                )
            }
        }
    }

    /// The fallback for a custom page that does not exist.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(
            "Page not found",
            "The page you are looking for does not exist.",
            "Go home",
            "/",
        )
    }

    /// The fallback for a custom page the backend failed to serve.
    #[must_use]
    pub fn unavailable() -> Self {
        Self::new(
            "Page unavailable",
            "This page could not be loaded right now. Please try again shortly.",
            "Go home",
            "/",
        )
    }
}

/// Title used for a role's default template.
const fn role_title(role: PageRole) -> &'static str {
    match role {
        PageRole::Homepage => "Home",
        PageRole::Shop => "Shop",
        PageRole::Cart => "Cart",
        PageRole::Checkout => "Checkout",
        PageRole::OrderSuccess => "Order complete",
        PageRole::About => "About us",
        PageRole::Contact => "Contact us",
        PageRole::Privacy => "Privacy policy",
        PageRole::Terms => "Terms of service",
    }
}

/// Parse the `?slug=` parameter. An unusable value is ignored.
fn explicit_slug(raw: Option<&str>) -> Option<Slug> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    match Slug::parse(raw) {
        Ok(slug) => Some(slug),
        Err(e) => {
            tracing::warn!(slug = %raw, error = %e, "Ignoring invalid slug parameter");
            None
        }
    }
}

fn breadcrumb(lookup: &PageLookup) {
    let slug = lookup.slug.as_ref().map_or("", Slug::as_str);
    add_breadcrumb(
        "page",
        "Page resolved",
        Some(&[("slug", slug), ("outcome", lookup.resolution.label())]),
    );
}

/// Resolve and render the page for a role.
async fn serve_role(
    state: &AppState,
    role: PageRole,
    query: &PageQuery,
    token: Option<&SecretString>,
) -> Response {
    let explicit = explicit_slug(query.slug.as_deref());
    let lookup = state.pages().lookup(Some(role), explicit.as_ref(), token).await;
    breadcrumb(&lookup);

    let status = if lookup.resolution.is_error() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    let fallback = Fallback::for_role(role);
    let rendered = render(lookup.resolution, role, fallback.clone());

    respond(state, rendered, status, fallback)
}

/// Turn a render decision into an HTML response.
///
/// A tree that fails to render degrades to the fallback.
fn respond(
    state: &AppState,
    rendered: Rendered<Fallback>,
    status: StatusCode,
    fallback: Fallback,
) -> Response {
    let source = rendered.source();
    let site_name = state.config().site_name.clone();

    let page = match rendered {
        Rendered::Stored(doc) => {
            page_template(&doc.components, doc.title, doc.description, &site_name, source)
        }
        Rendered::Default(role, tree) => page_template(
            &tree,
            role_title(role).to_string(),
            String::new(),
            &site_name,
            source,
        ),
        Rendered::Fallback(fallback) => {
            return fallback_response(fallback, site_name, status);
        }
    };

    match page {
        Ok(page) => {
            tracing::debug!(source = %source, "Rendering page");
            with_source(source, status, page.into_response())
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to render component tree");
            fallback_response(fallback, site_name, StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

fn page_template(
    tree: &ComponentTree,
    title: String,
    description: String,
    site_name: &str,
    source: RenderSource,
) -> askama::Result<PageTemplate> {
    Ok(PageTemplate {
        title,
        description,
        site_name: site_name.to_string(),
        source: source.as_str(),
        body_html: render_tree(tree)?,
    })
}

fn fallback_response(fallback: Fallback, site_name: String, status: StatusCode) -> Response {
    let template = FallbackTemplate {
        title: fallback.title,
        message: fallback.message,
        cta_label: fallback.cta_label,
        cta_href: fallback.cta_href,
        site_name,
        source: RenderSource::Fallback.as_str(),
    };

    match template.render() {
        Ok(html) => with_source(
            RenderSource::Fallback,
            status,
            axum::response::Html(html).into_response(),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render fallback page");
            with_source(RenderSource::Fallback, status, status.into_response())
        }
    }
}

fn with_source(source: RenderSource, status: StatusCode, body: Response) -> Response {
    (status, [(PAGE_SOURCE_HEADER, source.as_str())], body).into_response()
}

/// Display the homepage.
#[instrument(skip(state, token))]
pub async fn homepage(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Homepage, &query, token.as_ref()).await
}

/// Display the shop page.
#[instrument(skip(state, token))]
pub async fn shop(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Shop, &query, token.as_ref()).await
}

/// Display the cart page.
#[instrument(skip(state, token))]
pub async fn cart(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Cart, &query, token.as_ref()).await
}

/// Display the checkout page.
#[instrument(skip(state, token))]
pub async fn checkout(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Checkout, &query, token.as_ref()).await
}

/// Display the order confirmation page.
#[instrument(skip(state, token))]
pub async fn order_success(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::OrderSuccess, &query, token.as_ref()).await
}

/// Display the about page.
#[instrument(skip(state, token))]
pub async fn about(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::About, &query, token.as_ref()).await
}

/// Display the contact page.
#[instrument(skip(state, token))]
pub async fn contact(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Contact, &query, token.as_ref()).await
}

/// Display the privacy policy.
#[instrument(skip(state, token))]
pub async fn privacy(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Privacy, &query, token.as_ref()).await
}

/// Display the terms of service.
#[instrument(skip(state, token))]
pub async fn terms(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Response {
    serve_role(&state, PageRole::Terms, &query, token.as_ref()).await
}

/// Display a custom page by slug.
///
/// No role template applies here, so a missing page is a 404.
#[instrument(skip(state, token))]
pub async fn custom(
    State(state): State<AppState>,
    Path(raw_slug): Path<String>,
    ClientToken(token): ClientToken,
) -> Response {
    let site_name = state.config().site_name.clone();
    let Ok(slug) = Slug::parse(&raw_slug) else {
        return fallback_response(Fallback::not_found(), site_name, StatusCode::NOT_FOUND);
    };

    let lookup = state.pages().lookup(None, Some(&slug), token.as_ref()).await;
    breadcrumb(&lookup);

    let (status, fallback) = if lookup.resolution.is_error() {
        (StatusCode::SERVICE_UNAVAILABLE, Fallback::unavailable())
    } else {
        (StatusCode::NOT_FOUND, Fallback::not_found())
    };
    let rendered = render_unassigned(lookup.resolution, fallback.clone());
    let status = if rendered.source() == RenderSource::Stored {
        StatusCode::OK
    } else {
        status
    };

    respond(&state, rendered, status, fallback)
}

/// Create the customer page router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(homepage))
        .route("/shop", get(shop))
        .route("/cart", get(cart))
        .route("/checkout", get(checkout))
        .route("/order-success", get(order_success))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/privacy", get(privacy))
        .route("/terms", get(terms))
        .route("/p/{slug}", get(custom))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{PagesApiConfig, StorefrontConfig};
    use crate::store::MemoryConfigStore;

    /// State whose backend refuses every connection.
    fn offline_state() -> AppState {
        let mut pages = PagesApiConfig::new("http://127.0.0.1:9").unwrap();
        pages.retry_on_error = false;
        pages.timeout = Duration::from_secs(2);
        AppState::with_store(
            StorefrontConfig::with_pages(pages),
            Arc::new(MemoryConfigStore::new()),
        )
        .unwrap()
    }

    async fn get(uri: &str) -> (StatusCode, String, String) {
        let response = router()
            .with_state(offline_state())
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let source = response.headers()[PAGE_SOURCE_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, source, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn test_explicit_slug_parsing() {
        assert_eq!(
            explicit_slug(Some("promo-2024")),
            Some(Slug::parse("promo-2024").unwrap())
        );
        assert_eq!(explicit_slug(Some("  ")), None);
        assert_eq!(explicit_slug(Some("../etc")), None);
        assert_eq!(explicit_slug(None), None);
    }

    #[test]
    fn test_every_role_has_a_fallback_cta() {
        for role in PageRole::ALL {
            let fallback = Fallback::for_role(role);
            assert!(fallback.cta_href.starts_with('/'), "{role}");
            assert!(!fallback.title.is_empty(), "{role}");
        }
    }

    #[tokio::test]
    async fn test_backend_error_serves_role_fallback() {
        let (status, source, body) = get("/cart").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(source, "fallback");
        assert!(body.contains("Your cart is unavailable"));
        // The generated cart template never stands in for a failed fetch.
        assert!(!body.contains("c-cart"));
    }

    #[tokio::test]
    async fn test_invalid_custom_slug_is_not_found() {
        let (status, source, body) = get("/p/bad%20slug").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(source, "fallback");
        assert!(body.contains("Page not found"));
    }
}
