//! Core types for Hostfront pages.
//!
//! This module provides type-safe wrappers for the page-resolution domain.

pub mod component;
pub mod page;
pub mod role;
pub mod slug;

pub use component::{
    ButtonProps, CartProps, ComponentNode, FooterProps, HeaderProps, HeadingProps, HeroProps,
    ImageProps, NavLink, ProductsGridProps, SpacerProps, Style, TextProps, Widget,
};
pub use page::{ComponentTree, PageDocument, TreeError};
pub use role::{PageRole, UnknownRole};
pub use slug::{Slug, SlugError};
