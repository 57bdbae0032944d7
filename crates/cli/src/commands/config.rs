//! Role binding commands.
//!
//! # Usage
//!
//! ```bash
//! hf-cli config show
//! hf-cli config set cart basket-v2
//! hf-cli config unset cart --config /srv/hostfront/page_config.json
//! ```

use std::path::Path;

use hostfront_core::{PageConfig, PageRole, Slug};
use hostfront_storefront::store::{ConfigStore, FileConfigStore};

use super::CommandError;

/// Read the document at `path`, reporting corruption instead of hiding it.
///
/// A missing or blank file is an empty configuration.
pub fn read(path: &Path) -> Result<PageConfig, CommandError> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(PageConfig::default()),
        Err(e) => return Err(CommandError::Store(e.into())),
    };
    if raw.trim().is_empty() {
        return Ok(PageConfig::default());
    }
    Ok(PageConfig::from_json(&raw)?)
}

/// Print every role and what it is bound to.
#[allow(clippy::print_stdout)]
pub fn show(path: &Path) -> Result<(), CommandError> {
    let config = read(path)?;
    for role in PageRole::ALL {
        match config.get(role) {
            Some(slug) => println!("{:<14} {slug}", role.as_str()),
            None => println!("{:<14} (default: {})", role.as_str(), role.canonical_slug()),
        }
    }
    Ok(())
}

/// Bind `role` to `slug`.
pub fn set(path: &Path, role: &str, slug: &str) -> Result<(), CommandError> {
    let role: PageRole = role.parse()?;
    let slug = Slug::parse(slug)?;

    let store = FileConfigStore::new(path);
    // A corrupt document is replaced rather than patched.
    let mut config = store.load().unwrap_or_default();
    config.set(role, slug.clone());
    store.save(&config)?;

    tracing::info!(role = %role, slug = %slug, "Role bound");
    Ok(())
}

/// Remove `role`'s binding.
pub fn unset(path: &Path, role: &str) -> Result<(), CommandError> {
    let role: PageRole = role.parse()?;

    let store = FileConfigStore::new(path);
    let mut config = store.load().unwrap_or_default();
    match config.unset(role) {
        Some(previous) => {
            store.save(&config)?;
            tracing::info!(role = %role, previous = %previous, "Role unbound");
        }
        None => tracing::info!(role = %role, "Role was not bound"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_config.json");

        set(&path, "cart", "basket-v2").unwrap();
        assert_eq!(
            read(&path).unwrap().get(PageRole::Cart),
            Some(&Slug::parse("basket-v2").unwrap())
        );

        unset(&path, "cart").unwrap();
        assert!(read(&path).unwrap().is_empty());
    }

    #[test]
    fn test_set_rejects_unknown_role_and_bad_slug() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_config.json");

        assert!(matches!(
            set(&path, "blog", "news"),
            Err(CommandError::UnknownRole(_))
        ));
        assert!(matches!(
            set(&path, "cart", "a/b"),
            Err(CommandError::InvalidSlug(_))
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_read_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_config.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read(&path), Err(CommandError::CorruptConfig(_))));
    }

    #[test]
    fn test_set_overwrites_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page_config.json");
        std::fs::write(&path, "{ not json").unwrap();

        set(&path, "about", "about-us").unwrap();
        assert_eq!(
            read(&path).unwrap().get(PageRole::About),
            Some(&Slug::parse("about-us").unwrap())
        );
    }
}
