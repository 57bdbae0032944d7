//! Template, resolution and fetch commands.

use std::path::Path;

use hostfront_core::{PageRole, Resolution, Slug, default_template_for, resolve_configured};
use hostfront_storefront::backend::PageClient;
use hostfront_storefront::config::PagesApiConfig;

use super::CommandError;
use super::config::read;

/// Print the default template for `role`.
#[allow(clippy::print_stdout)]
pub fn template(role: &str) -> Result<(), CommandError> {
    let tree = default_template_for(role)?;
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

/// Work out the slug for a role and/or explicit slug.
pub fn resolve_slug(
    role: Option<&str>,
    slug: Option<&str>,
    config_path: &Path,
) -> Result<Slug, CommandError> {
    let role = role.map(str::parse::<PageRole>).transpose()?;
    let explicit = slug.map(Slug::parse).transpose()?;
    let config = read(config_path)?;

    resolve_configured(role, explicit.as_ref(), &config).ok_or(CommandError::NothingToResolve)
}

/// Print the slug a request would fetch.
#[allow(clippy::print_stdout)]
pub fn resolve(role: Option<&str>, slug: Option<&str>, config_path: &Path) -> Result<(), CommandError> {
    println!("{}", resolve_slug(role, slug, config_path)?);
    Ok(())
}

/// Fetch `slug` from the page API and print the outcome.
///
/// A stored document is printed as JSON. A backend error fails the command.
#[allow(clippy::print_stdout)]
pub async fn fetch(slug: &str) -> Result<(), CommandError> {
    let slug = Slug::parse(slug)?;
    let config = PagesApiConfig::from_env()?;
    let client = PageClient::new(&config)?;

    tracing::info!(slug = %slug, api = %config.base_url, "Fetching page");
    match client.fetch(&slug, None).await {
        Resolution::Found(doc) => {
            println!("found");
            println!("{}", serde_json::to_string_pretty(&doc)?);
        }
        Resolution::NotFound => println!("not_found"),
        Resolution::Error(reason) => return Err(CommandError::Unavailable(reason)),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn slug(s: &str) -> Slug {
        Slug::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_without_config_uses_canonical_slug() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert_eq!(
            resolve_slug(Some("order_success"), None, &path).unwrap(),
            slug("order-success")
        );
    }

    #[test]
    fn test_resolve_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_config.json");
        std::fs::write(&path, r#"{"cart":"basket-v2"}"#).unwrap();

        assert_eq!(
            resolve_slug(Some("cart"), None, &path).unwrap(),
            slug("basket-v2")
        );
        assert_eq!(
            resolve_slug(Some("cart"), Some("promo-2024"), &path).unwrap(),
            slug("promo-2024")
        );
    }

    #[test]
    fn test_resolve_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");

        assert!(matches!(
            resolve_slug(None, None, &path),
            Err(CommandError::NothingToResolve)
        ));
        assert!(matches!(
            resolve_slug(Some("blog"), None, &path),
            Err(CommandError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_template_rejects_unknown_role() {
        assert!(matches!(
            template("other"),
            Err(CommandError::UnknownRole(_))
        ));
    }
}
