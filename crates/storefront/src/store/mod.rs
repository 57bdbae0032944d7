//! Persistence for the admin's page configuration.
//!
//! The configuration is a single JSON document, overwritten wholesale on
//! every save. Loading never fails: a missing document and a corrupt one
//! both come back as `None`, which callers treat as "no role configured".
//! A corrupt document is replaced by the next successful save.
//!
//! There is no protection against two writers; the last save wins.

mod file;
mod memory;

pub use file::FileConfigStore;
pub use memory::MemoryConfigStore;

use hostfront_core::PageConfig;
use thiserror::Error;

/// Errors writing the page configuration.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Where the page configuration lives.
///
/// Both methods may block on I/O; async callers run them through
/// `spawn_blocking`.
pub trait ConfigStore: Send + Sync {
    /// Load the saved configuration, or `None` if there is none usable.
    fn load(&self) -> Option<PageConfig>;

    /// Replace the saved configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be written.
    fn save(&self, config: &PageConfig) -> Result<(), StoreError>;
}

/// Decode a stored document, logging and discarding corrupt ones.
fn decode(raw: &str, origin: &str) -> Option<PageConfig> {
    if raw.trim().is_empty() {
        return None;
    }
    match PageConfig::from_json(raw) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(error = %e, origin, "Ignoring corrupt page configuration");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_blank_is_empty() {
        assert!(decode("", "test").is_none());
        assert!(decode("  \n", "test").is_none());
    }

    #[test]
    fn test_decode_corrupt_is_empty() {
        assert!(decode("{\"homepage\":", "test").is_none());
        assert!(decode("{\"blog\": \"news\"}", "test").is_none());
    }

    #[test]
    fn test_decode_valid() {
        let config = decode("{\"cart\": \"basket\"}", "test");
        assert!(config.is_some_and(|c| !c.is_empty()));
    }
}
