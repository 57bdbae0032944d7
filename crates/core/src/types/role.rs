//! Semantic page roles.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The semantic category a page serves.
///
/// This is a closed set. Strings outside it are rejected with
/// [`UnknownRole`]; nothing is ever mapped onto a "closest" role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageRole {
    Homepage,
    Cart,
    Shop,
    Checkout,
    OrderSuccess,
    About,
    Contact,
    Privacy,
    Terms,
}

/// A role string that is not part of the [`PageRole`] set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown page role: {0}")]
pub struct UnknownRole(pub String);

impl PageRole {
    /// Every role, in admin display order.
    pub const ALL: [Self; 9] = [
        Self::Homepage,
        Self::Shop,
        Self::Cart,
        Self::Checkout,
        Self::OrderSuccess,
        Self::About,
        Self::Contact,
        Self::Privacy,
        Self::Terms,
    ];

    /// The wire name of the role (`order_success`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Homepage => "homepage",
            Self::Cart => "cart",
            Self::Shop => "shop",
            Self::Checkout => "checkout",
            Self::OrderSuccess => "order_success",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Privacy => "privacy",
            Self::Terms => "terms",
        }
    }

    /// The slug a role maps to when nothing more specific is known.
    #[must_use]
    pub const fn canonical_slug(self) -> &'static str {
        match self {
            Self::Homepage => "home",
            Self::Cart => "cart",
            Self::Shop => "shop",
            Self::Checkout => "checkout",
            Self::OrderSuccess => "order-success",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Privacy => "privacy",
            Self::Terms => "terms",
        }
    }

    /// Whether the role hosts a transactional widget (cart, product grid).
    #[must_use]
    pub const fn is_commerce(self) -> bool {
        matches!(
            self,
            Self::Homepage | Self::Cart | Self::Shop | Self::Checkout
        )
    }
}

impl std::fmt::Display for PageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PageRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "homepage" => Ok(Self::Homepage),
            "cart" => Ok(Self::Cart),
            "shop" => Ok(Self::Shop),
            "checkout" => Ok(Self::Checkout),
            "order_success" => Ok(Self::OrderSuccess),
            "about" => Ok(Self::About),
            "contact" => Ok(Self::Contact),
            "privacy" => Ok(Self::Privacy),
            "terms" => Ok(Self::Terms),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in PageRole::ALL {
            assert_eq!(role.as_str().parse::<PageRole>().unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = "blog".parse::<PageRole>().unwrap_err();
        assert_eq!(err, UnknownRole("blog".to_string()));
        assert_eq!(err.to_string(), "unknown page role: blog");
    }

    #[test]
    fn test_role_parsing_is_exact() {
        assert!("Homepage".parse::<PageRole>().is_err());
        assert!("order-success".parse::<PageRole>().is_err());
        assert!(" cart".parse::<PageRole>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&PageRole::OrderSuccess).unwrap();
        assert_eq!(json, "\"order_success\"");
        let role: PageRole = serde_json::from_str("\"privacy\"").unwrap();
        assert_eq!(role, PageRole::Privacy);
    }

    #[test]
    fn test_canonical_slugs() {
        assert_eq!(PageRole::Homepage.canonical_slug(), "home");
        assert_eq!(PageRole::OrderSuccess.canonical_slug(), "order-success");
        assert_eq!(PageRole::Cart.canonical_slug(), "cart");
    }
}
