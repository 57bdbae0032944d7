//! Component nodes for the visual page builder.
//!
//! On the wire a node is a flat JSON object:
//!
//! ```json
//! { "id": "hero-1", "type": "hero", "props": { "title": "Hi" }, "style": { "padding": 24 } }
//! ```
//!
//! Known `type` tags decode into a typed [`Widget`] variant. Anything else is
//! kept verbatim as [`Widget::Unknown`] so documents written by newer builders
//! survive a load/save cycle.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// A single component in a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawComponent", into = "RawComponent")]
pub struct ComponentNode {
    /// Identifier, unique within its tree.
    pub id: String,
    /// The widget and its typed props.
    pub widget: Widget,
    /// CSS-like style declarations.
    pub style: Style,
}

impl ComponentNode {
    /// Create a node with no style.
    #[must_use]
    pub fn new(id: impl Into<String>, widget: Widget) -> Self {
        Self {
            id: id.into(),
            widget,
            style: Style::default(),
        }
    }

    /// Add a style declaration.
    #[must_use]
    pub fn with_style(mut self, key: &str, value: &str) -> Self {
        self.style.insert(key, value);
        self
    }

    /// The node's `type` tag.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.widget.kind()
    }
}

/// Widget vocabulary of the page builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Header(HeaderProps),
    Hero(HeroProps),
    Heading(HeadingProps),
    Text(TextProps),
    Button(ButtonProps),
    Image(ImageProps),
    Spacer(SpacerProps),
    Cart(CartProps),
    ProductsGrid(ProductsGridProps),
    Footer(FooterProps),
    /// A widget type this version does not know; props are passed through.
    Unknown { kind: String, props: JsonValue },
}

impl Widget {
    pub const HEADER: &'static str = "header";
    pub const HERO: &'static str = "hero";
    pub const HEADING: &'static str = "heading";
    pub const TEXT: &'static str = "text";
    pub const BUTTON: &'static str = "button";
    pub const IMAGE: &'static str = "image";
    pub const SPACER: &'static str = "spacer";
    pub const CART: &'static str = "cart";
    pub const PRODUCTS_GRID: &'static str = "products-grid";
    pub const FOOTER: &'static str = "footer";

    /// The `type` tag used on the wire.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Header(_) => Self::HEADER,
            Self::Hero(_) => Self::HERO,
            Self::Heading(_) => Self::HEADING,
            Self::Text(_) => Self::TEXT,
            Self::Button(_) => Self::BUTTON,
            Self::Image(_) => Self::IMAGE,
            Self::Spacer(_) => Self::SPACER,
            Self::Cart(_) => Self::CART,
            Self::ProductsGrid(_) => Self::PRODUCTS_GRID,
            Self::Footer(_) => Self::FOOTER,
            Self::Unknown { kind, .. } => kind,
        }
    }

    /// Whether the widget is a cart or product grid.
    #[must_use]
    pub const fn is_transactional(&self) -> bool {
        matches!(self, Self::Cart(_) | Self::ProductsGrid(_))
    }

    /// Decode a wire node's props.
    ///
    /// Props that don't fit a known widget keep the node as
    /// [`Widget::Unknown`], so one bad node never costs the whole page.
    fn from_parts(kind: String, props: JsonValue) -> Self {
        // Builders omit `props` for widgets left at their defaults.
        let props = if props.is_null() {
            JsonValue::Object(serde_json::Map::new())
        } else {
            props
        };

        let decoded = match kind.as_str() {
            Self::HEADER => serde_json::from_value(props.clone()).map(Self::Header),
            Self::HERO => serde_json::from_value(props.clone()).map(Self::Hero),
            Self::HEADING => serde_json::from_value(props.clone()).map(Self::Heading),
            Self::TEXT => serde_json::from_value(props.clone()).map(Self::Text),
            Self::BUTTON => serde_json::from_value(props.clone()).map(Self::Button),
            Self::IMAGE => serde_json::from_value(props.clone()).map(Self::Image),
            Self::SPACER => serde_json::from_value(props.clone()).map(Self::Spacer),
            Self::CART => serde_json::from_value(props.clone()).map(Self::Cart),
            Self::PRODUCTS_GRID => serde_json::from_value(props.clone()).map(Self::ProductsGrid),
            Self::FOOTER => serde_json::from_value(props.clone()).map(Self::Footer),
            _ => return Self::Unknown { kind, props },
        };

        decoded.unwrap_or_else(|error| {
            tracing::warn!(
                kind = %kind,
                error = %error,
                "Malformed component props, keeping node as unknown"
            );
            Self::Unknown { kind, props }
        })
    }

    fn into_parts(self) -> (String, JsonValue) {
        let kind = self.kind().to_string();
        let props = match self {
            Self::Header(p) => serde_json::to_value(p),
            Self::Hero(p) => serde_json::to_value(p),
            Self::Heading(p) => serde_json::to_value(p),
            Self::Text(p) => serde_json::to_value(p),
            Self::Button(p) => serde_json::to_value(p),
            Self::Image(p) => serde_json::to_value(p),
            Self::Spacer(p) => serde_json::to_value(p),
            Self::Cart(p) => serde_json::to_value(p),
            Self::ProductsGrid(p) => serde_json::to_value(p),
            Self::Footer(p) => serde_json::to_value(p),
            Self::Unknown { props, .. } => Ok(props),
        };
        (kind, props.unwrap_or_default())
    }
}

// =============================================================================
// Widget Props
// =============================================================================

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    #[must_use]
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeaderProps {
    pub logo_text: String,
    pub links: Vec<NavLink>,
    pub show_cart: bool,
}

impl Default for HeaderProps {
    fn default() -> Self {
        Self {
            logo_text: String::new(),
            links: Vec::new(),
            show_cart: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeroProps {
    pub title: String,
    pub subtitle: Option<String>,
    pub cta_text: Option<String>,
    pub cta_href: Option<String>,
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HeadingProps {
    pub text: String,
    /// HTML heading level, clamped to 1..=6 when rendered.
    pub level: u8,
}

impl Default for HeadingProps {
    fn default() -> Self {
        Self {
            text: String::new(),
            level: 2,
        }
    }
}

impl HeadingProps {
    /// The heading level clamped to a valid HTML level.
    #[must_use]
    pub fn html_level(&self) -> u8 {
        self.level.clamp(1, 6)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextProps {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ButtonProps {
    pub label: String,
    pub href: String,
    pub variant: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageProps {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacerProps {
    pub height: u32,
}

impl Default for SpacerProps {
    fn default() -> Self {
        Self { height: 32 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CartProps {
    pub show_checkout_button: bool,
    /// Render totals only, without quantity controls.
    pub summary_only: bool,
    pub empty_message: String,
}

impl Default for CartProps {
    fn default() -> Self {
        Self {
            show_checkout_button: true,
            summary_only: false,
            empty_message: "Your cart is empty.".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductsGridProps {
    pub title: Option<String>,
    pub columns: u8,
    pub limit: Option<u32>,
    pub category: Option<String>,
}

impl Default for ProductsGridProps {
    fn default() -> Self {
        Self {
            title: None,
            columns: 3,
            limit: None,
            category: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FooterProps {
    pub text: String,
    pub links: Vec<NavLink>,
}

// =============================================================================
// Style
// =============================================================================

/// Properties React treats as unitless; every other numeric value gets `px`.
const UNITLESS_PROPERTIES: &[&str] = &[
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "lineHeight",
    "opacity",
    "order",
    "zIndex",
];

/// Free-form style declarations keyed by camelCase property name.
///
/// Numeric values are accepted on input and normalised to CSS strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style(BTreeMap<String, String>);

impl Style {
    /// Insert or replace a declaration.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.to_string(), value.to_string());
    }

    /// Look up a declaration.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as an inline `style` attribute value.
    ///
    /// Declarations that could break out of the attribute or the declaration
    /// list are dropped.
    #[must_use]
    pub fn to_inline_css(&self) -> String {
        self.0
            .iter()
            .filter(|(k, v)| is_safe_css(k) && is_safe_css(v))
            .map(|(k, v)| format!("{}: {v};", kebab_case(k)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn is_safe_css(s: &str) -> bool {
    !s.is_empty() && !s.contains([';', '{', '}', '<', '>', '"'])
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

impl Serialize for Style {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Style {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = match JsonValue::deserialize(deserializer)? {
            JsonValue::Object(map) => map,
            JsonValue::Null => return Ok(Self::default()),
            other => {
                tracing::warn!(value = %other, "Ignoring style that is not an object");
                return Ok(Self::default());
            }
        };
        let mut style = BTreeMap::new();
        for (key, value) in raw {
            let value = match value {
                JsonValue::Null => continue,
                JsonValue::String(s) => s,
                JsonValue::Bool(b) => b.to_string(),
                JsonValue::Number(n) if UNITLESS_PROPERTIES.contains(&key.as_str()) => {
                    n.to_string()
                }
                JsonValue::Number(n) => format!("{n}px"),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    tracing::warn!(key = %key, "Dropping nested style value");
                    continue;
                }
            };
            style.insert(key, value);
        }
        Ok(Self(style))
    }
}

// =============================================================================
// Wire Form
// =============================================================================

#[derive(Serialize, Deserialize)]
struct RawComponent {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    props: JsonValue,
    #[serde(default)]
    style: Style,
}

impl From<RawComponent> for ComponentNode {
    fn from(raw: RawComponent) -> Self {
        Self {
            id: raw.id,
            widget: Widget::from_parts(raw.kind, raw.props),
            style: raw.style,
        }
    }
}

impl From<ComponentNode> for RawComponent {
    fn from(node: ComponentNode) -> Self {
        let (kind, props) = node.widget.into_parts();
        Self {
            id: node.id,
            kind,
            props,
            style: node.style,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_known_type_decodes_to_typed_props() {
        let node: ComponentNode = serde_json::from_value(json!({
            "id": "h1",
            "type": "heading",
            "props": { "text": "Welcome", "level": 1 }
        }))
        .unwrap();

        assert_eq!(node.kind(), "heading");
        assert_eq!(
            node.widget,
            Widget::Heading(HeadingProps {
                text: "Welcome".to_string(),
                level: 1,
            })
        );
    }

    #[test]
    fn test_missing_props_use_defaults() {
        let node: ComponentNode =
            serde_json::from_value(json!({ "id": "c", "type": "cart" })).unwrap();
        assert_eq!(node.widget, Widget::Cart(CartProps::default()));
    }

    #[test]
    fn test_unknown_type_is_passed_through() {
        let value = json!({
            "id": "x",
            "type": "countdown",
            "props": { "until": "2030-01-01" },
            "style": {}
        });
        let node: ComponentNode = serde_json::from_value(value.clone()).unwrap();

        match &node.widget {
            Widget::Unknown { kind, props } => {
                assert_eq!(kind, "countdown");
                assert_eq!(props["until"], "2030-01-01");
            }
            other => panic!("expected passthrough, got {other:?}"),
        }
        assert_eq!(serde_json::to_value(&node).unwrap(), value);
    }

    #[test]
    fn test_malformed_known_props_kept_as_unknown() {
        let value = json!({
            "id": "h",
            "type": "heading",
            "props": { "level": "2", "text": "x" }
        });
        let node: ComponentNode = serde_json::from_value(value.clone()).unwrap();

        assert_eq!(node.kind(), "heading");
        assert!(matches!(node.widget, Widget::Unknown { .. }));
        // The original props are written back untouched.
        assert_eq!(serde_json::to_value(&node).unwrap(), value);
    }

    #[test]
    fn test_one_bad_node_keeps_its_siblings() {
        let nodes: Vec<ComponentNode> = serde_json::from_value(json!([
            { "id": "h", "type": "heading", "props": { "level": "2", "text": "x" } },
            { "id": "t", "type": "text", "props": { "content": "Still here" } }
        ]))
        .unwrap();

        assert_eq!(nodes.len(), 2);
        assert!(matches!(nodes[0].widget, Widget::Unknown { .. }));
        assert!(matches!(&nodes[1].widget, Widget::Text(p) if p.content == "Still here"));
    }

    #[test]
    fn test_products_grid_tag() {
        let node = ComponentNode::new("g", Widget::ProductsGrid(ProductsGridProps::default()));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["type"], "products-grid");
        assert_eq!(value["props"]["columns"], 3);
    }

    #[test]
    fn test_style_numbers_normalised() {
        let style: Style = serde_json::from_value(json!({
            "paddingTop": 24,
            "fontWeight": 700,
            "color": "#333",
            "border": null
        }))
        .unwrap();

        assert_eq!(style.get("paddingTop"), Some("24px"));
        assert_eq!(style.get("fontWeight"), Some("700"));
        assert_eq!(style.get("border"), None);
        assert_eq!(
            style.to_inline_css(),
            "color: #333; font-weight: 700; padding-top: 24px;"
        );
    }

    #[test]
    fn test_style_drops_nested_values() {
        let style: Style =
            serde_json::from_value(json!({ "margin": [1, 2], "color": "red" })).unwrap();
        assert_eq!(style.get("margin"), None);
        assert_eq!(style.get("color"), Some("red"));

        let style: Style = serde_json::from_value(json!("color: red")).unwrap();
        assert!(style.is_empty());
    }

    #[test]
    fn test_bad_style_keeps_node() {
        let node: ComponentNode = serde_json::from_value(json!({
            "id": "t",
            "type": "text",
            "props": { "content": "Hi" },
            "style": ["padding", 4]
        }))
        .unwrap();

        assert!(matches!(node.widget, Widget::Text(_)));
        assert!(node.style.is_empty());
    }

    #[test]
    fn test_inline_css_drops_injection() {
        let mut style = Style::default();
        style.insert("color", "red; background: url(x)");
        style.insert("margin", "0 auto");
        assert_eq!(style.to_inline_css(), "margin: 0 auto;");
    }

    #[test]
    fn test_heading_level_clamped() {
        let props = HeadingProps {
            text: String::new(),
            level: 9,
        };
        assert_eq!(props.html_level(), 6);
    }
}
