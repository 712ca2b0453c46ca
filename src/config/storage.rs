//! Dotenv-style configuration store
//!
//! Persists a flat `KEY=VALUE` mapping to a single text file. The whole file
//! is read on load and replaced on save.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, StoreError};

/// Flat configuration mapping, ordered by key so saves are deterministic
pub type ConfigMap = BTreeMap<String, String>;

/// Line terminator used when writing the backing file
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
/// Line terminator used when writing the backing file
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// A configuration store backed by a dotenv-style file
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    defaults: ConfigMap,
}

impl ConfigStore {
    /// Create a store over `path` with no defaults
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            defaults: ConfigMap::new(),
        }
    }

    /// Attach explicit defaults, overridden by whatever the file contains
    pub fn with_defaults(mut self, defaults: ConfigMap) -> Self {
        self.defaults = defaults;
        self
    }

    /// Capture the current process environment values of `keys` as defaults.
    ///
    /// The environment is read once, here. The store never writes to it.
    pub fn with_process_defaults<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        for key in keys {
            let key = key.as_ref();
            if let Ok(value) = std::env::var(key) {
                self.defaults.insert(key.to_string(), value);
            }
        }
        self
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Defaults applied underneath the file contents
    pub fn defaults(&self) -> &ConfigMap {
        &self.defaults
    }

    /// Load the mapping: defaults first, then every file entry on top.
    ///
    /// A missing file (or a path through a non-directory) yields the defaults alone.
    pub fn load(&self) -> Result<ConfigMap> {
        let mut entries = self.defaults.clone();
        entries.extend(self.load_file()?);
        Ok(entries)
    }

    /// Load only the entries stored in the backing file, without defaults
    pub fn load_file(&self) -> Result<ConfigMap> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
                debug!(path = %self.path.display(), "No config file");
                return Ok(ConfigMap::new());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                }
                .into());
            }
        };

        let parsed = parse(&content);
        debug!(
            path = %self.path.display(),
            entries = parsed.len(),
            "Loaded config file"
        );
        Ok(parsed)
    }

    /// Replace the backing file with `entries`.
    ///
    /// Entries are validated before anything touches the disk. The new content
    /// is written to a temporary file next to the target and renamed over it.
    pub fn save(&self, entries: &ConfigMap) -> Result<()> {
        for (key, value) in entries {
            validate_entry(key, value)?;
        }

        let content = serialize(entries);
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => {
                std::fs::create_dir_all(parent).map_err(write_err)?;
                parent
            }
            _ => Path::new("."),
        };

        let mut temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
        temp.write_all(content.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;

        debug!(
            path = %self.path.display(),
            entries = entries.len(),
            "Saved config file"
        );
        Ok(())
    }
}

/// Parse dotenv-style text.
///
/// Blank lines and `#` comments are skipped. Lines without `=` or with an
/// empty key are skipped with a warning. The first `=` splits key from value;
/// later duplicates of a key win.
pub fn parse(text: &str) -> ConfigMap {
    let mut entries = ConfigMap::new();

    for (idx, raw) in text.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            warn!(line = idx + 1, "Skipping config line without '='");
            continue;
        };
        if key.is_empty() {
            warn!(line = idx + 1, "Skipping config line with empty key");
            continue;
        }

        entries.insert(key.to_string(), value.to_string());
    }

    entries
}

/// Serialize entries as `KEY=VALUE` lines joined by [`LINE_ENDING`]
pub fn serialize(entries: &ConfigMap) -> String {
    entries
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join(LINE_ENDING)
}

/// Check that an entry survives a save/load cycle unchanged
pub fn validate_entry(key: &str, value: &str) -> std::result::Result<(), StoreError> {
    let key_reason = if key.is_empty() {
        Some("key is empty")
    } else if key.contains('=') {
        Some("key contains '='")
    } else if key.contains(['\n', '\r']) {
        Some("key contains a line break")
    } else if key.trim_start().is_empty() || key.trim_start().starts_with('#') {
        Some("key would be read back as a comment or blank line")
    } else {
        None
    };
    if let Some(reason) = key_reason {
        return Err(StoreError::InvalidKey {
            key: key.to_string(),
            reason: reason.to_string(),
        });
    }

    if value.contains(['\n', '\r']) {
        return Err(StoreError::InvalidValue {
            key: key.to_string(),
            reason: "value contains a line break".to_string(),
        });
    }

    Ok(())
}
