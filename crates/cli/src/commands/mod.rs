//! Subcommand implementations.

pub mod config;
pub mod pages;

use hostfront_core::{ConfigDecodeError, SlugError, UnknownRole};
use hostfront_storefront::backend::BackendError;
use hostfront_storefront::config::ConfigError;
use hostfront_storefront::store::StoreError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),

    #[error("Invalid slug: {0}")]
    InvalidSlug(#[from] SlugError),

    #[error("Corrupt page configuration: {0}")]
    CorruptConfig(#[from] ConfigDecodeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("Page API error: {0}")]
    Unavailable(String),

    #[error("Nothing to resolve: give a role or a slug")]
    NothingToResolve,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
