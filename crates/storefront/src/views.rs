//! HTML rendering of component trees.
//!
//! Each widget has its own Askama template under `templates/components/`.
//! Nodes are rendered in tree order and concatenated; the page template
//! embeds the result. Unknown widget types render nothing.

use askama::Template;
use askama_web::WebTemplate;
use hostfront_core::{
    ButtonProps, CartProps, ComponentNode, ComponentTree, FooterProps, HeaderProps, HeadingProps,
    HeroProps, ImageProps, ProductsGridProps, SpacerProps, Widget,
};

use crate::filters;

#[derive(Template)]
#[template(path = "components/header.html")]
struct HeaderView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a HeaderProps,
}

#[derive(Template)]
#[template(path = "components/hero.html")]
struct HeroView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a HeroProps,
}

#[derive(Template)]
#[template(path = "components/heading.html")]
struct HeadingView<'a> {
    id: &'a str,
    style: &'a str,
    level: u8,
    props: &'a HeadingProps,
}

#[derive(Template)]
#[template(path = "components/text.html")]
struct TextView<'a> {
    id: &'a str,
    style: &'a str,
    paragraphs: Vec<&'a str>,
}

#[derive(Template)]
#[template(path = "components/button.html")]
struct ButtonView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a ButtonProps,
}

#[derive(Template)]
#[template(path = "components/image.html")]
struct ImageView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a ImageProps,
}

#[derive(Template)]
#[template(path = "components/spacer.html")]
struct SpacerView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a SpacerProps,
}

#[derive(Template)]
#[template(path = "components/cart.html")]
struct CartView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a CartProps,
}

#[derive(Template)]
#[template(path = "components/products_grid.html")]
struct ProductsGridView<'a> {
    id: &'a str,
    style: &'a str,
    columns: u8,
    props: &'a ProductsGridProps,
}

#[derive(Template)]
#[template(path = "components/footer.html")]
struct FooterView<'a> {
    id: &'a str,
    style: &'a str,
    props: &'a FooterProps,
}

/// A page built from a component tree.
#[derive(Template, WebTemplate)]
#[template(path = "pages/page.html")]
pub struct PageTemplate {
    pub title: String,
    pub description: String,
    pub site_name: String,
    pub source: &'static str,
    pub body_html: String,
}

/// The route's own UI when no tree can be shown.
#[derive(Template, WebTemplate)]
#[template(path = "pages/fallback.html")]
pub struct FallbackTemplate {
    pub title: String,
    pub message: String,
    pub cta_label: String,
    pub cta_href: String,
    pub site_name: String,
    pub source: &'static str,
}

/// Render every node of `tree`, in order.
///
/// # Errors
///
/// Returns an error if a component template fails to render.
pub fn render_tree(tree: &ComponentTree) -> askama::Result<String> {
    let mut html = String::new();
    for node in tree {
        html.push_str(&render_node(node)?);
        html.push('\n');
    }
    Ok(html)
}

/// Render a single node.
///
/// # Errors
///
/// Returns an error if the component template fails to render.
pub fn render_node(node: &ComponentNode) -> askama::Result<String> {
    let style = node.style.to_inline_css();
    let id = node.id.as_str();
    let style = style.as_str();

    match &node.widget {
        Widget::Header(props) => HeaderView { id, style, props }.render(),
        Widget::Hero(props) => HeroView { id, style, props }.render(),
        Widget::Heading(props) => HeadingView {
            id,
            style,
            level: props.html_level(),
            props,
        }
        .render(),
        Widget::Text(props) => TextView {
            id,
            style,
            paragraphs: props
                .content
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect(),
        }
        .render(),
        Widget::Button(props) => ButtonView { id, style, props }.render(),
        Widget::Image(props) => ImageView { id, style, props }.render(),
        Widget::Spacer(props) => SpacerView { id, style, props }.render(),
        Widget::Cart(props) => CartView { id, style, props }.render(),
        Widget::ProductsGrid(props) => ProductsGridView {
            id,
            style,
            columns: props.columns.clamp(1, 6),
            props,
        }
        .render(),
        Widget::Footer(props) => FooterView { id, style, props }.render(),
        Widget::Unknown { kind, .. } => {
            tracing::debug!(id, kind = %kind, "Skipping unknown widget type");
            Ok(String::new())
        }
    }
}
