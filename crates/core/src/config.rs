//! Role → slug bindings chosen by the admin.
//!
//! The configuration is one JSON object keyed by role name. Every role is
//! written on save; `null` (or an empty string from older builders) means
//! the role is not bound to anything.
//!
//! ```json
//! { "homepage": "spring-launch", "cart": null, "about": "" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{PageRole, Slug, SlugError, UnknownRole};

/// Errors decoding a stored [`PageConfig`].
#[derive(Debug, Error)]
pub enum ConfigDecodeError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),
    #[error("invalid slug for role {role}: {source}")]
    InvalidSlug { role: PageRole, source: SlugError },
}

/// Which slug, if any, each role is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPageConfig", into = "RawPageConfig")]
pub struct PageConfig {
    bindings: BTreeMap<PageRole, Slug>,
}

type RawPageConfig = BTreeMap<String, Option<String>>;

impl PageConfig {
    /// The slug bound to `role`, if any.
    #[must_use]
    pub fn get(&self, role: PageRole) -> Option<&Slug> {
        self.bindings.get(&role)
    }

    /// Bind `role` to `slug`, replacing any previous binding.
    pub fn set(&mut self, role: PageRole, slug: Slug) {
        self.bindings.insert(role, slug);
    }

    /// Remove the binding for `role`.
    pub fn unset(&mut self, role: PageRole) -> Option<Slug> {
        self.bindings.remove(&role)
    }

    /// Whether no role is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Bound roles in role order.
    pub fn iter(&self) -> impl Iterator<Item = (PageRole, &Slug)> {
        self.bindings.iter().map(|(role, slug)| (*role, slug))
    }

    /// Decode a stored configuration document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, names a role outside the
    /// closed set, or binds a role to an invalid slug.
    pub fn from_json(raw: &str) -> Result<Self, ConfigDecodeError> {
        let raw: RawPageConfig = serde_json::from_str(raw)?;
        Self::from_raw(raw)
    }

    /// Encode the configuration as a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn from_raw(raw: RawPageConfig) -> Result<Self, ConfigDecodeError> {
        let mut bindings = BTreeMap::new();
        for (key, value) in raw {
            let role: PageRole = key.parse()?;
            let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
                continue;
            };
            let slug = Slug::parse(value.trim())
                .map_err(|source| ConfigDecodeError::InvalidSlug { role, source })?;
            bindings.insert(role, slug);
        }
        Ok(Self { bindings })
    }
}

impl TryFrom<RawPageConfig> for PageConfig {
    type Error = ConfigDecodeError;

    fn try_from(raw: RawPageConfig) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl From<PageConfig> for RawPageConfig {
    fn from(config: PageConfig) -> Self {
        PageRole::ALL
            .iter()
            .map(|role| {
                (
                    role.as_str().to_string(),
                    config.get(*role).map(|s| s.as_str().to_string()),
                )
            })
            .collect()
    }
}
