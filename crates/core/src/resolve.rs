//! Slug resolution.
//!
//! Precedence, highest first:
//!
//! 1. an explicit slug supplied by the caller (query string, path)
//! 2. the slug the admin bound to the role in [`PageConfig`]
//!    ([`resolve_configured`] only)
//! 3. the role's canonical slug ([`PageRole::canonical_slug`])
//!
//! With neither a role nor an explicit slug there is nothing to fetch and
//! the caller shows its own fallback UI.

use crate::config::PageConfig;
use crate::types::{PageRole, Slug};

/// Resolve the slug to fetch from a role and an optional explicit slug.
///
/// Pure and total over the role set.
#[must_use]
pub fn resolve(role: Option<PageRole>, explicit: Option<&Slug>) -> Option<Slug> {
    if let Some(slug) = explicit {
        return Some(slug.clone());
    }
    role.map(canonical)
}

/// Like [`resolve`], but honours an admin binding before the static table.
#[must_use]
pub fn resolve_configured(
    role: Option<PageRole>,
    explicit: Option<&Slug>,
    config: &PageConfig,
) -> Option<Slug> {
    if let Some(slug) = explicit {
        return Some(slug.clone());
    }
    let role = role?;
    Some(config.get(role).cloned().unwrap_or_else(|| canonical(role)))
}

fn canonical(role: PageRole) -> Slug {
    Slug::from_static(role.canonical_slug())
}
