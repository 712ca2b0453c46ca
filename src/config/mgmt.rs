//! Management service configuration
//!
//! An explicit configuration object over a [`ConfigStore`]. Components that
//! need configuration take a reference to it; reloading is an explicit
//! [`MgmtConfig::refresh`] call rather than a mutation of the process
//! environment.
//!
//! Entries read from the file and the store's defaults are kept apart:
//! lookups fall back to the defaults, but only file entries are persisted.

use tracing::debug;

use crate::error::Result;

use super::{ConfigMap, ConfigStore};

/// Administrative credential recognized by the management service
pub const MGMT_PASSWORD: &str = "MGMT_PASSWORD";

/// Default location of the backing file, relative to the working directory
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Keys whose process environment values act as defaults
pub const RECOGNIZED_KEYS: &[&str] = &[MGMT_PASSWORD];

/// In-memory view of the persisted management configuration
#[derive(Debug, Clone)]
pub struct MgmtConfig {
    store: ConfigStore,
    entries: ConfigMap,
}

impl MgmtConfig {
    /// Open a configuration over `store`, loading it immediately
    pub fn open(store: ConfigStore) -> Result<Self> {
        let entries = store.load_file()?;
        Ok(Self { store, entries })
    }

    /// Reload from the store, replacing every in-memory value
    pub fn refresh(&mut self) -> Result<()> {
        self.entries = self.store.load_file()?;
        debug!(entries = self.entries.len(), "Refreshed management config");
        Ok(())
    }

    /// Write the file-backed entries back to the store; defaults are never written
    pub fn persist(&self) -> Result<()> {
        self.store.save(&self.entries)
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Entries backed by the file
    pub fn entries(&self) -> &ConfigMap {
        &self.entries
    }

    /// Entries as seen by readers: defaults with file entries on top
    pub fn effective(&self) -> ConfigMap {
        let mut merged = self.store.defaults().clone();
        merged.extend(self.entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }

    /// Look up a key in the file entries, then in the defaults
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .or_else(|| self.store.defaults().get(key))
            .map(String::as_str)
    }

    /// Whether `key` resolves only through the defaults
    pub fn is_default_only(&self, key: &str) -> bool {
        !self.entries.contains_key(key) && self.store.defaults().contains_key(key)
    }

    /// Set a value in memory, returning the previous file-backed one
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), value.into())
    }

    /// Remove a file-backed value from memory, returning it.
    ///
    /// A default for the same key stays visible through [`MgmtConfig::get`].
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn mgmt_password(&self) -> Option<&str> {
        self.get(MGMT_PASSWORD)
    }

    pub fn set_mgmt_password(&mut self, password: impl Into<String>) -> Option<String> {
        self.set(MGMT_PASSWORD, password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let config = MgmtConfig::open(ConfigStore::new(temp_dir.path().join(".env"))).unwrap();
        assert!(config.entries().is_empty());
        assert_eq!(config.mgmt_password(), None);
    }

    #[test]
    fn test_set_persist_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let store = ConfigStore::new(temp_dir.path().join(".env"));

        let mut config = MgmtConfig::open(store.clone()).unwrap();
        assert_eq!(config.set_mgmt_password("secret1"), None);
        config.set("OTHER", "opaque");
        config.persist().unwrap();

        let reopened = MgmtConfig::open(store).unwrap();
        assert_eq!(reopened.mgmt_password(), Some("secret1"));
        assert_eq!(reopened.get("OTHER"), Some("opaque"));
    }

    #[test]
    fn test_refresh_replaces_instead_of_merging() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "A=1\nB=2").unwrap();

        let mut config = MgmtConfig::open(ConfigStore::new(&path)).unwrap();
        config.set("LOCAL_ONLY", "x");

        std::fs::write(&path, "B=3\nC=4").unwrap();
        config.refresh().unwrap();

        assert_eq!(config.get("A"), None);
        assert_eq!(config.get("B"), Some("3"));
        assert_eq!(config.get("C"), Some("4"));
        assert_eq!(config.get("LOCAL_ONLY"), None);
    }

    #[test]
    fn test_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = MgmtConfig::open(ConfigStore::new(temp_dir.path().join(".env"))).unwrap();
        config.set("A", "1");
        assert_eq!(config.remove("A"), Some("1".to_string()));
        assert_eq!(config.remove("A"), None);
    }

    fn store_with_default(path: &std::path::Path) -> ConfigStore {
        let defaults: ConfigMap = [(MGMT_PASSWORD.to_string(), "from-env".to_string())]
            .into_iter()
            .collect();
        ConfigStore::new(path).with_defaults(defaults)
    }

    #[test]
    fn test_defaults_read_through_but_never_persisted() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");

        let mut config = MgmtConfig::open(store_with_default(&path)).unwrap();
        assert_eq!(config.mgmt_password(), Some("from-env"));
        assert!(config.entries().is_empty());
        assert!(config.is_default_only(MGMT_PASSWORD));

        config.set("A", "1");
        config.persist().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=1");
        assert_eq!(config.effective().get(MGMT_PASSWORD).map(String::as_str), Some("from-env"));
    }

    #[test]
    fn test_file_value_shadows_default_until_removed() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        std::fs::write(&path, "MGMT_PASSWORD=from-file").unwrap();

        let mut config = MgmtConfig::open(store_with_default(&path)).unwrap();
        assert_eq!(config.mgmt_password(), Some("from-file"));
        assert!(!config.is_default_only(MGMT_PASSWORD));

        assert_eq!(config.remove(MGMT_PASSWORD), Some("from-file".to_string()));
        assert_eq!(config.remove(MGMT_PASSWORD), None);
        assert_eq!(config.mgmt_password(), Some("from-env"));

        config.persist().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_persist_does_not_touch_memory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".env");
        let mut config = MgmtConfig::open(ConfigStore::new(&path)).unwrap();
        config.set("A", "1");
        config.persist().unwrap();

        std::fs::write(&path, "A=changed").unwrap();
        config.persist().unwrap();
        assert_eq!(config.get("A"), Some("1"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=1");
    }
}
