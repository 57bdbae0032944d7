//! Default component trees for pages that have never been saved.
//!
//! Every role has its own arm below; there is no shared "generic" template.
//! Each tree is a header, the role's content, then a footer. Informational
//! roles get a heading and copy, commerce roles get a cart or products grid.
//! Node ids are fixed so re-rendering a default page is stable.

use crate::types::{
    ButtonProps, CartProps, ComponentNode, ComponentTree, FooterProps, HeaderProps, HeadingProps,
    HeroProps, NavLink, PageRole, ProductsGridProps, TextProps, UnknownRole, Widget,
};

const BRAND: &str = "Hostfront";
const ACCENT: &str = "#2563eb";
const MUTED: &str = "#6b7280";

/// The default tree for `role`.
#[must_use]
pub fn default_template(role: PageRole) -> ComponentTree {
    let mut nodes = vec![header()];
    nodes.extend(content(role));
    nodes.push(footer());
    ComponentTree::new(nodes)
}

/// The default tree for a role given by name.
///
/// # Errors
///
/// Returns [`UnknownRole`] for names outside the role set; no template is
/// substituted.
pub fn default_template_for(role: &str) -> Result<ComponentTree, UnknownRole> {
    Ok(default_template(role.parse()?))
}

fn content(role: PageRole) -> Vec<ComponentNode> {
    match role {
        PageRole::Homepage => vec![
            ComponentNode::new(
                "homepage-hero",
                Widget::Hero(HeroProps {
                    title: "Hosting that just works".to_string(),
                    subtitle: Some(
                        "Fast servers, honest pricing and support that answers.".to_string(),
                    ),
                    cta_text: Some("Browse plans".to_string()),
                    cta_href: Some("/shop".to_string()),
                    background_image: None,
                }),
            )
            .with_style("backgroundColor", ACCENT)
            .with_style("color", "#ffffff")
            .with_style("padding", "64px 24px"),
            ComponentNode::new(
                "homepage-products",
                Widget::ProductsGrid(ProductsGridProps {
                    title: Some("Popular plans".to_string()),
                    columns: 3,
                    limit: Some(6),
                    category: None,
                }),
            )
            .with_style("padding", "48px 24px"),
        ],
        PageRole::Shop => vec![
            page_heading("shop", "All plans"),
            ComponentNode::new(
                "shop-products",
                Widget::ProductsGrid(ProductsGridProps::default()),
            )
            .with_style("padding", "24px"),
        ],
        PageRole::Cart => vec![
            page_heading("cart", "Your cart"),
            ComponentNode::new("cart-items", Widget::Cart(CartProps::default()))
                .with_style("padding", "24px"),
        ],
        PageRole::Checkout => vec![
            page_heading("checkout", "Checkout"),
            ComponentNode::new(
                "checkout-summary",
                Widget::Cart(CartProps {
                    show_checkout_button: false,
                    summary_only: true,
                    ..CartProps::default()
                }),
            )
            .with_style("padding", "24px"),
        ],
        PageRole::OrderSuccess => vec![
            page_heading("order-success", "Thank you for your order!"),
            copy(
                "order-success",
                "We have received your order and sent a confirmation to your email. \
                 Your services will be provisioned shortly.",
            ),
            ComponentNode::new(
                "order-success-continue",
                Widget::Button(ButtonProps {
                    label: "Continue shopping".to_string(),
                    href: "/shop".to_string(),
                    variant: Some("primary".to_string()),
                }),
            )
            .with_style("textAlign", "center"),
        ],
        PageRole::About => vec![
            page_heading("about", "About us"),
            copy(
                "about",
                "We run dependable hosting for people who would rather build than babysit servers.",
            ),
        ],
        PageRole::Contact => vec![
            page_heading("contact", "Contact us"),
            copy(
                "contact",
                "Questions about a plan or an invoice? Open a ticket from your account \
                 or write to our support team and we will get back to you.",
            ),
        ],
        PageRole::Privacy => vec![
            page_heading("privacy", "Privacy policy"),
            copy(
                "privacy",
                "This page explains what information we collect and how we use it.",
            ),
        ],
        PageRole::Terms => vec![
            page_heading("terms", "Terms of service"),
            copy(
                "terms",
                "These terms govern your use of our services. Please read them carefully.",
            ),
        ],
    }
}

fn header() -> ComponentNode {
    ComponentNode::new(
        "header",
        Widget::Header(HeaderProps {
            logo_text: BRAND.to_string(),
            links: vec![
                NavLink::new("Home", "/"),
                NavLink::new("Shop", "/shop"),
                NavLink::new("About", "/about"),
                NavLink::new("Contact", "/contact"),
            ],
            show_cart: true,
        }),
    )
    .with_style("padding", "16px 24px")
    .with_style("borderBottom", "1px solid #e5e7eb")
}

fn footer() -> ComponentNode {
    ComponentNode::new(
        "footer",
        Widget::Footer(FooterProps {
            text: format!("© {BRAND}. All rights reserved."),
            links: vec![
                NavLink::new("Privacy", "/privacy"),
                NavLink::new("Terms", "/terms"),
            ],
        }),
    )
    .with_style("padding", "24px")
    .with_style("color", MUTED)
}

fn page_heading(prefix: &str, text: &str) -> ComponentNode {
    ComponentNode::new(
        format!("{prefix}-heading"),
        Widget::Heading(HeadingProps {
            text: text.to_string(),
            level: 1,
        }),
    )
    .with_style("textAlign", "center")
    .with_style("padding", "32px 24px 8px")
}

fn copy(prefix: &str, content: &str) -> ComponentNode {
    ComponentNode::new(
        format!("{prefix}-text"),
        Widget::Text(TextProps {
            content: content.to_string(),
        }),
    )
    .with_style("maxWidth", "720px")
    .with_style("margin", "0 auto")
    .with_style("color", MUTED)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_is_framed_by_header_and_footer() {
        for role in PageRole::ALL {
            let tree = default_template(role);
            assert!(tree.len() >= 3, "{role} has no content");
            assert_eq!(tree.first().unwrap().kind(), Widget::HEADER, "{role}");
            assert_eq!(tree.last().unwrap().kind(), Widget::FOOTER, "{role}");
        }
    }

    #[test]
    fn test_templates_are_deterministic() {
        for role in PageRole::ALL {
            assert_eq!(default_template(role), default_template(role));
        }
    }

    #[test]
    fn test_template_ids_are_unique() {
        for role in PageRole::ALL {
            assert_eq!(default_template(role).validate(), Ok(()), "{role}");
        }
    }

    #[test]
    fn test_commerce_roles_carry_a_transactional_widget() {
        for role in PageRole::ALL {
            let tree = default_template(role);
            let has_widget = tree.iter().any(|n| n.widget.is_transactional());
            assert_eq!(has_widget, role.is_commerce(), "{role}");
        }
    }

    #[test]
    fn test_cart_template_contains_cart() {
        assert!(default_template(PageRole::Cart).contains_kind(Widget::CART));
        assert!(default_template(PageRole::Shop).contains_kind(Widget::PRODUCTS_GRID));
    }

    #[test]
    fn test_informational_roles_use_heading_and_text() {
        for role in [
            PageRole::About,
            PageRole::Contact,
            PageRole::Privacy,
            PageRole::Terms,
        ] {
            let tree = default_template(role);
            assert!(tree.contains_kind(Widget::HEADING), "{role}");
            assert!(tree.contains_kind(Widget::TEXT), "{role}");
        }
    }

    #[test]
    fn test_unknown_role_name_is_rejected() {
        let err = default_template_for("blog").unwrap_err();
        assert_eq!(err, UnknownRole("blog".to_string()));
    }

    #[test]
    fn test_role_name_lookup_matches_typed_lookup() {
        assert_eq!(
            default_template_for("order_success").unwrap(),
            default_template(PageRole::OrderSuccess)
        );
    }

    #[test]
    fn test_roles_get_distinct_templates() {
        assert_ne!(
            default_template(PageRole::Privacy),
            default_template(PageRole::Terms)
        );
        assert_ne!(
            default_template(PageRole::Homepage),
            default_template(PageRole::Shop)
        );
    }
}
