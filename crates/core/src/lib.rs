//! Hostfront Core - Page resolution types and rules.
//!
//! This crate provides the pieces shared by every Hostfront component:
//! - `storefront` - Customer-facing pages and the admin page-builder API
//! - `cli` - Command-line tools for inspecting templates and configuration
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! storage access, no HTTP clients. Resolving a page is split into steps
//! that callers drive in order:
//!
//! ```text
//! PageConfig ──► resolve ──► (fetch, done by the caller) ──► render
//!                                                             │
//!                                            default_template ┘
//! ```
//!
//! # Modules
//!
//! - [`types`] - Page roles, slugs, component trees and page documents
//! - [`config`] - Role → slug bindings saved by the admin
//! - [`resolve`] - Slug resolution with documented precedence
//! - [`template`] - Deterministic default component trees per role
//! - [`render`] - The render decision for a fetch outcome

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod render;
pub mod resolve;
pub mod template;
pub mod types;

pub use config::{ConfigDecodeError, PageConfig};
pub use render::{RenderSource, Rendered, Resolution, render, render_unassigned};
pub use resolve::{resolve, resolve_configured};
pub use template::{default_template, default_template_for};
pub use types::*;
