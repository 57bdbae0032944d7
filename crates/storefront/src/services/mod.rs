//! Business logic services for storefront.
//!
//! # Services
//!
//! - `pages` - Page resolution: configuration, slug, fetch, retry

pub mod pages;

pub use pages::{PageLookup, PageService};
