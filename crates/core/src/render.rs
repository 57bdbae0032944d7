//! The render decision for a page fetch.
//!
//! ```text
//! Found(doc)  ──► doc.components, as stored
//! NotFound    ──► default_template(role)
//! Error       ──► the caller's own fallback UI
//! ```
//!
//! The decision is terminal: nothing here retries. A backend error never
//! produces the generated template, so a flaky backend degrades to a UI
//! the route controls.

use serde::Serialize;

use crate::template::default_template;
use crate::types::{ComponentTree, PageDocument, PageRole};

/// Outcome of fetching a page document.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Found(PageDocument),
    /// The backend has no document for the slug. Expected, not an error.
    NotFound,
    /// Transport or server failure, with a reason for the logs.
    Error(String),
}

impl Resolution {
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Short label for logs and headers.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::NotFound => "not_found",
            Self::Error(_) => "error",
        }
    }
}

/// Where the rendered content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderSource {
    Stored,
    Default,
    Fallback,
}

impl RenderSource {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stored => "stored",
            Self::Default => "default",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for RenderSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to put on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered<F> {
    /// A stored document, components untouched.
    Stored(PageDocument),
    /// The generated template for the role.
    Default(PageRole, ComponentTree),
    /// The caller-supplied fallback UI.
    Fallback(F),
}

impl<F> Rendered<F> {
    #[must_use]
    pub const fn source(&self) -> RenderSource {
        match self {
            Self::Stored(_) => RenderSource::Stored,
            Self::Default(..) => RenderSource::Default,
            Self::Fallback(_) => RenderSource::Fallback,
        }
    }

    /// The component tree to render, unless the fallback was chosen.
    #[must_use]
    pub const fn tree(&self) -> Option<&ComponentTree> {
        match self {
            Self::Stored(doc) => Some(&doc.components),
            Self::Default(_, tree) => Some(tree),
            Self::Fallback(_) => None,
        }
    }
}

/// Decide what to render for a role's fetch outcome.
pub fn render<F>(resolution: Resolution, role: PageRole, fallback: F) -> Rendered<F> {
    match resolution {
        Resolution::Found(doc) => Rendered::Stored(doc),
        Resolution::NotFound => Rendered::Default(role, default_template(role)),
        Resolution::Error(_) => Rendered::Fallback(fallback),
    }
}

/// Decide what to render for a page requested by slug alone.
///
/// Without a role there is no template to generate, so `NotFound` also
/// lands on the fallback.
pub fn render_unassigned<F>(resolution: Resolution, fallback: F) -> Rendered<F> {
    match resolution {
        Resolution::Found(doc) => Rendered::Stored(doc),
        Resolution::NotFound | Resolution::Error(_) => Rendered::Fallback(fallback),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{ComponentNode, Slug, TextProps, Widget};

    fn stored_doc() -> PageDocument {
        PageDocument {
            slug: Slug::parse("cart").unwrap(),
            title: "Basket".to_string(),
            description: String::new(),
            components: ComponentTree::new(vec![ComponentNode::new(
                "only",
                Widget::Text(TextProps {
                    content: "custom".to_string(),
                }),
            )]),
            updated_at: None,
        }
    }

    #[test]
    fn test_found_renders_stored_components_exactly() {
        let doc = stored_doc();
        let rendered = render(Resolution::Found(doc.clone()), PageRole::Cart, "fallback");

        assert_eq!(rendered.source(), RenderSource::Stored);
        assert_eq!(rendered.tree(), Some(&doc.components));
        // No header/footer merged in from the default template.
        assert_eq!(rendered.tree().unwrap().len(), 1);
    }

    #[test]
    fn test_not_found_renders_role_template() {
        let rendered = render(Resolution::NotFound, PageRole::Cart, "fallback");

        assert_eq!(rendered.source(), RenderSource::Default);
        let tree = rendered.tree().unwrap();
        assert_eq!(tree, &default_template(PageRole::Cart));
        assert!(tree.contains_kind(Widget::CART));
    }

    #[test]
    fn test_error_never_renders_template() {
        for role in PageRole::ALL {
            let rendered = render(Resolution::Error("timeout".to_string()), role, "fallback");
            assert_eq!(rendered, Rendered::Fallback("fallback"));
            assert!(rendered.tree().is_none());
        }
    }

    #[test]
    fn test_unassigned_not_found_falls_back() {
        assert_eq!(
            render_unassigned(Resolution::NotFound, 404),
            Rendered::Fallback(404)
        );
        let doc = stored_doc();
        assert_eq!(
            render_unassigned(Resolution::Found(doc.clone()), 404),
            Rendered::Stored(doc)
        );
    }

    #[test]
    fn test_resolution_labels() {
        assert_eq!(Resolution::NotFound.label(), "not_found");
        assert!(Resolution::Error(String::new()).is_error());
        assert!(!Resolution::NotFound.is_error());
    }
}
