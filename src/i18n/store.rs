//! Durable storage for the last chosen language.
//!
//! The runtime reads the stored code once at startup and writes it on every
//! successful language switch. Two stores are provided: an in-memory one,
//! which clones share, and a JSON file store.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Name of the key under which the language is stored. Must match the
/// field name of `StoredPreference`.
pub(crate) const PREFERENCE_KEY: &str = "language";

/// A durable key holding the last chosen locale code.
pub trait PreferenceStore: Send + Sync {
    /// Read the stored code, `None` if nothing was stored yet.
    fn load(&self) -> Result<Option<String>>;

    /// Store a code, replacing any previous value.
    fn save(&self, code: &str) -> Result<()>;
}

/// In-memory store. Clones share the same slot, so a store handed to one
/// runtime can seed another.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    value: Arc<Mutex<Option<String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `code`.
    pub fn with_value(code: &str) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(code.to_string()))),
        }
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<Option<String>> {
        let value = self
            .value
            .lock()
            .map_err(|_| anyhow!("preference store lock poisoned"))?;
        Ok(value.clone())
    }

    fn save(&self, code: &str) -> Result<()> {
        let mut value = self
            .value
            .lock()
            .map_err(|_| anyhow!("preference store lock poisoned"))?;
        *value = Some(code.to_string());
        Ok(())
    }
}

/// On-disk shape of the preference file. The field is named after
/// `PREFERENCE_KEY`; serde renames cannot take a const, so a test pins the two.
#[derive(Debug, Serialize, Deserialize)]
struct StoredPreference {
    language: String,
}

/// Store backed by a small JSON document: `{"language": "uk"}`.
#[derive(Debug, Clone)]
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Option<String>> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e).context(format!(
                    "Failed to read language preference from {}",
                    self.path.display()
                ))
            }
        };

        let stored: StoredPreference = serde_json::from_str(&json).context(format!(
            "Invalid language preference file {} (expected a '{}' field)",
            self.path.display(),
            PREFERENCE_KEY
        ))?;

        Ok(Some(stored.language))
    }

    fn save(&self, code: &str) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .context(format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&StoredPreference {
            language: code.to_string(),
        })?;

        // Write next to the target and rename so readers never see a torn file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).context(format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .context(format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }
}
