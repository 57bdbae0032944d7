//! In-process configuration store.

use std::sync::{Mutex, PoisonError};

use hostfront_core::PageConfig;

use super::{ConfigStore, StoreError, decode};

/// Keeps the configuration document in memory.
///
/// The raw JSON is stored rather than the decoded value so tests can plant
/// corrupt documents.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    raw: Mutex<Option<String>>,
}

impl MemoryConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding `raw` as its document.
    #[must_use]
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }

    /// The stored document as written.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.raw
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Option<PageConfig> {
        let raw = self.raw();
        decode(raw.as_deref()?, "memory")
    }

    fn save(&self, config: &PageConfig) -> Result<(), StoreError> {
        let json = config.to_json()?;
        *self.raw.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use hostfront_core::{PageRole, Slug};

    use super::*;

    #[test]
    fn test_empty_store_loads_nothing() {
        assert!(MemoryConfigStore::new().load().is_none());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = MemoryConfigStore::new();
        let mut config = PageConfig::default();
        config.set(PageRole::Homepage, Slug::parse("promo").unwrap());
        config.set(PageRole::Terms, Slug::parse("legal-terms").unwrap());

        store.save(&config).unwrap();

        assert_eq!(store.load(), Some(config));
    }

    #[test]
    fn test_corrupt_document_self_heals_on_save() {
        let store = MemoryConfigStore::with_raw("not json at all");
        assert!(store.load().is_none());

        let mut config = PageConfig::default();
        config.set(PageRole::Cart, Slug::parse("basket").unwrap());
        store.save(&config).unwrap();

        assert_eq!(store.load(), Some(config));
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let store = MemoryConfigStore::new();
        let mut first = PageConfig::default();
        first.set(PageRole::About, Slug::parse("team").unwrap());
        store.save(&first).unwrap();

        let mut second = PageConfig::default();
        second.set(PageRole::Contact, Slug::parse("support").unwrap());
        store.save(&second).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.get(PageRole::About), None);
        assert_eq!(loaded, second);
    }
}
