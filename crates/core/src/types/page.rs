//! Page documents and component trees.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::component::{ComponentNode, Widget};
use super::slug::Slug;

/// Structural problems in a [`ComponentTree`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("component at position {0} has an empty id")]
    EmptyId(usize),
    #[error("duplicate component id: {0}")]
    DuplicateId(String),
}

/// An ordered list of components; order is render order, top to bottom.
///
/// Ids must be unique within a tree. Decoding does not check this, so
/// anything that persists a tree calls [`ComponentTree::validate`] first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentTree(Vec<ComponentNode>);

impl ComponentTree {
    #[must_use]
    pub const fn new(nodes: Vec<ComponentNode>) -> Self {
        Self(nodes)
    }

    #[must_use]
    pub fn nodes(&self) -> &[ComponentNode] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ComponentNode> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&ComponentNode> {
        self.0.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ComponentNode> {
        self.0.last()
    }

    /// Whether any node has the given `type` tag.
    #[must_use]
    pub fn contains_kind(&self, kind: &str) -> bool {
        self.0.iter().any(|n| n.kind() == kind)
    }

    /// Append a widget under a freshly generated id and return that id.
    ///
    /// Generated ids look like `text-3f2a9c1b` and never collide with ids
    /// already in the tree.
    pub fn push_widget(&mut self, widget: Widget) -> String {
        let id = loop {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let candidate = format!("{}-{}", widget.kind(), suffix.get(..8).unwrap_or(&suffix));
            if !self.0.iter().any(|n| n.id == candidate) {
                break candidate;
            }
        };
        self.0.push(ComponentNode::new(id.clone(), widget));
        id
    }

    /// Check that every id is non-empty and unique.
    ///
    /// # Errors
    ///
    /// Returns the first offending node.
    pub fn validate(&self) -> Result<(), TreeError> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for (i, node) in self.0.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(TreeError::EmptyId(i));
            }
            if !seen.insert(node.id.as_str()) {
                return Err(TreeError::DuplicateId(node.id.clone()));
            }
        }
        Ok(())
    }
}

impl From<Vec<ComponentNode>> for ComponentTree {
    fn from(nodes: Vec<ComponentNode>) -> Self {
        Self(nodes)
    }
}

impl<'a> IntoIterator for &'a ComponentTree {
    type Item = &'a ComponentNode;
    type IntoIter = std::slice::Iter<'a, ComponentNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A stored page, owned by the backend and always written wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDocument {
    pub slug: Slug,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub components: ComponentTree,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl PageDocument {
    /// Check the document before it is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the component tree breaks id uniqueness.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.components.validate()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::component::{TextProps, Widget};
    use serde_json::json;

    fn text(id: &str) -> ComponentNode {
        ComponentNode::new(id, Widget::Text(TextProps::default()))
    }

    #[test]
    fn test_validate_accepts_unique_ids() {
        let tree = ComponentTree::new(vec![text("a"), text("b")]);
        assert_eq!(tree.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let tree = ComponentTree::new(vec![text("a"), text("b"), text("a")]);
        assert_eq!(tree.validate(), Err(TreeError::DuplicateId("a".to_string())));
    }

    #[test]
    fn test_validate_rejects_blank_ids() {
        let tree = ComponentTree::new(vec![text("a"), text(" ")]);
        assert_eq!(tree.validate(), Err(TreeError::EmptyId(1)));
    }

    #[test]
    fn test_push_widget_generates_unique_ids() {
        let mut tree = ComponentTree::default();
        let a = tree.push_widget(Widget::Text(TextProps::default()));
        let b = tree.push_widget(Widget::Text(TextProps::default()));

        assert_ne!(a, b);
        assert!(a.starts_with("text-"));
        assert_eq!(tree.len(), 2);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_document_decodes_backend_json() {
        let doc: PageDocument = serde_json::from_value(json!({
            "slug": "about",
            "title": "About us",
            "description": "Who we are",
            "components": [
                { "id": "h", "type": "header" },
                { "id": "t", "type": "text", "props": { "content": "Hello" } },
                { "id": "f", "type": "footer" }
            ],
            "updated_at": "2026-03-01T12:00:00Z"
        }))
        .unwrap();

        assert_eq!(doc.slug.as_str(), "about");
        assert_eq!(doc.components.len(), 3);
        assert_eq!(doc.components.first().unwrap().kind(), "header");
        assert!(doc.updated_at.is_some());
    }

    #[test]
    fn test_document_defaults_optional_fields() {
        let doc: PageDocument =
            serde_json::from_value(json!({ "slug": "x", "title": "X" })).unwrap();
        assert!(doc.components.is_empty());
        assert!(doc.description.is_empty());
    }
}
