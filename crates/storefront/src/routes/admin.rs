//! Page configuration and page-builder endpoints.
//!
//! JSON only. Page writes go through the page API with the caller's token,
//! so the backend decides who may change what. The page configuration is
//! local, so changing it needs a bearer token here: the configured admin
//! token when there is one, any token otherwise.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
};
use hostfront_core::{
    ComponentTree, PageConfig, PageDocument, PageRole, RenderSource, Resolution, Slug,
    default_template, default_template_for,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::ClientToken;
use crate::routes::pages::PageQuery;
use crate::state::AppState;

/// The tree the page builder should open for a role.
#[derive(Debug, Serialize)]
pub struct BuilderPage {
    pub role: PageRole,
    pub slug: Slug,
    /// `stored` when a saved document exists, `default` otherwise.
    pub source: RenderSource,
    pub title: String,
    pub description: String,
    pub components: ComponentTree,
}

fn parse_role(raw: &str) -> Result<PageRole> {
    raw.parse()
        .map_err(|e: hostfront_core::UnknownRole| AppError::BadRequest(e.to_string()))
}

fn parse_slug(raw: &str) -> Result<Slug> {
    Slug::parse(raw).map_err(|e| AppError::BadRequest(format!("invalid slug {raw:?}: {e}")))
}

/// Check the caller may change local settings.
fn authorize(state: &AppState, token: Option<&SecretString>) -> Result<()> {
    let Some(token) = token else {
        return Err(AppError::Unauthorized("bearer token required".to_string()));
    };
    match &state.config().admin_token {
        Some(expected) if expected.expose_secret() != token.expose_secret() => {
            tracing::warn!("Rejected page configuration change with wrong admin token");
            Err(AppError::Unauthorized("invalid admin token".to_string()))
        }
        _ => Ok(()),
    }
}

/// Return the saved page configuration.
#[instrument(skip(state))]
pub async fn get_page_config(State(state): State<AppState>) -> Json<PageConfig> {
    Json(state.pages().page_config().await)
}

/// Replace the page configuration wholesale.
///
/// # Errors
///
/// Returns 401 without an acceptable bearer token, and 500 if the
/// configuration cannot be written.
#[instrument(skip(state, token, config))]
pub async fn put_page_config(
    State(state): State<AppState>,
    ClientToken(token): ClientToken,
    Json(config): Json<PageConfig>,
) -> Result<Json<PageConfig>> {
    authorize(&state, token.as_ref())?;
    state.pages().save_page_config(config.clone()).await?;
    tracing::info!(bindings = config.iter().count(), "Page configuration saved");
    Ok(Json(config))
}

/// Return the default template for a role.
///
/// # Errors
///
/// Returns 400 for a role outside the known set.
#[instrument]
pub async fn get_template(Path(role): Path<String>) -> Result<Json<ComponentTree>> {
    default_template_for(&role)
        .map(Json)
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Return the tree to edit for a role: the stored document, else the
/// role's default template.
///
/// # Errors
///
/// Returns 400 for an unknown role or invalid slug, and 502 when the page
/// API fails.
#[instrument(skip(state, token))]
pub async fn get_builder_page(
    State(state): State<AppState>,
    Path(role): Path<String>,
    Query(query): Query<PageQuery>,
    ClientToken(token): ClientToken,
) -> Result<Json<BuilderPage>> {
    let role = parse_role(&role)?;
    let explicit = query
        .slug
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_slug(s.trim()))
        .transpose()?;

    let lookup = state
        .pages()
        .lookup(Some(role), explicit.as_ref(), token.as_ref())
        .await;
    let slug = lookup
        .slug
        .ok_or_else(|| AppError::Internal("role resolved to no slug".to_string()))?;

    let page = match lookup.resolution {
        Resolution::Found(doc) => BuilderPage {
            role,
            slug,
            source: RenderSource::Stored,
            title: doc.title,
            description: doc.description,
            components: doc.components,
        },
        Resolution::NotFound => BuilderPage {
            role,
            slug,
            source: RenderSource::Default,
            title: String::new(),
            description: String::new(),
            components: default_template(role),
        },
        Resolution::Error(reason) => return Err(AppError::Unavailable(reason)),
    };

    Ok(Json(page))
}

/// Save a page document.
///
/// # Errors
///
/// Returns 400 if the document is invalid or names a different slug, and
/// the page API's error otherwise.
#[instrument(skip(state, doc, token))]
pub async fn put_page(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    ClientToken(token): ClientToken,
    Json(doc): Json<PageDocument>,
) -> Result<StatusCode> {
    let slug = parse_slug(&slug)?;
    if doc.slug != slug {
        return Err(AppError::BadRequest(format!(
            "document slug {} does not match {slug}",
            doc.slug
        )));
    }
    doc.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    state.pages().client().put_page(&doc, token.as_ref()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create the admin router, mounted under `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/page-config", get(get_page_config).put(put_page_config))
        .route("/templates/{role}", get(get_template))
        .route("/builder/{role}", get(get_builder_page))
        .route("/pages/{slug}", put(put_page))
}
