//! File-backed configuration store.

use std::io::Write;
use std::path::{Path, PathBuf};

use hostfront_core::PageConfig;
use tempfile::NamedTempFile;

use super::{ConfigStore, StoreError, decode};

/// Keeps the configuration document in a JSON file.
///
/// Saves write a uniquely named sibling temporary file and rename it over the
/// target, so a crash mid-save leaves the previous document intact and
/// concurrent saves never share a temporary file. The last rename wins.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Option<PageConfig> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => decode(&raw, &self.path.display().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to read page configuration");
                None
            }
        }
    }

    fn save(&self, config: &PageConfig) -> Result<(), StoreError> {
        let json = config.to_json()?;

        let dir = self.dir();
        std::fs::create_dir_all(dir)?;

        let mut temp = NamedTempFile::new_in(dir)?;
        temp.write_all(json.as_bytes())?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::info!(path = %self.path.display(), "Saved page configuration");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hostfront_core::{PageRole, Slug};

    use super::*;

    #[test]
    fn test_missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("default_page_config.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("nested/default_page_config.json"));

        let mut config = PageConfig::default();
        config.set(PageRole::OrderSuccess, Slug::parse("thanks").unwrap());
        store.save(&config).unwrap();

        assert_eq!(store.load(), Some(config));
        // Only the document itself is left behind.
        let entries = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_corrupt_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default_page_config.json");
        std::fs::write(&path, "{\"homepage\": 42}").unwrap();

        let store = FileConfigStore::new(&path);
        assert!(store.load().is_none());

        store.save(&PageConfig::default()).unwrap();
        assert_eq!(store.load(), Some(PageConfig::default()));
    }

    #[test]
    fn test_concurrent_saves_all_succeed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileConfigStore::new(dir.path().join("default_page_config.json"));

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let store = &store;
                scope.spawn(move || {
                    for round in 0..50 {
                        let mut config = PageConfig::default();
                        let slug = Slug::parse(&format!("cart-{worker}-{round}")).unwrap();
                        config.set(PageRole::Cart, slug);
                        store.save(&config).unwrap();
                    }
                });
            }
        });

        let saved = store.load().unwrap();
        assert!(saved.get(PageRole::Cart).is_some());
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_bare_file_name_saves_in_current_dir() {
        let store = FileConfigStore::new("default_page_config.json");
        assert_eq!(store.dir(), Path::new("."));
    }
}
