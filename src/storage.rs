//! Key-value persistence for the entity collections.
//!
//! Each collection lives in its own JSON file under the data directory
//! (`clients.json`, `contracts.json`, ...). A schema version marker sits
//! next to them; when the expected version moves ahead of the stored one,
//! the directory is cleared and reseeded rather than migrated. The data
//! is operator-maintained admin state, not a system of record.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::types::Config;

/// Bump when a stored collection's shape changes incompatibly.
pub const SCHEMA_VERSION: u32 = 3;

const SCHEMA_VERSION_FILE: &str = "schema_version";

/// Load configuration from ~/.staffdesk/config.json, falling back to the
/// default data path under the home directory when no config file exists.
pub fn load_config() -> Result<Config, StoreError> {
    let home = dirs::home_dir().ok_or(StoreError::NoHomeDir)?;
    let config_path = home.join(".staffdesk").join("config.json");

    if !config_path.exists() {
        return Ok(Config {
            data_path: home
                .join(".staffdesk")
                .join("data")
                .to_string_lossy()
                .into_owned(),
        });
    }

    let content = fs::read_to_string(&config_path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// File-per-collection JSON storage rooted at a data directory.
#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Storage { root: root.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Storage::new(&config.data_path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, name: &str) -> PathBuf {
        self.root.join(format!("{}.json", name))
    }

    /// Compare the stored schema version against [`SCHEMA_VERSION`],
    /// clearing stale data when it lags. Returns `true` when a reset
    /// happened.
    pub fn ensure_schema(&self) -> Result<bool, StoreError> {
        fs::create_dir_all(&self.root)?;
        let marker = self.root.join(SCHEMA_VERSION_FILE);
        let stored: u32 = fs::read_to_string(&marker)
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(0);

        if stored >= SCHEMA_VERSION {
            return Ok(false);
        }

        if stored > 0 {
            log::info!(
                "schema version moved {} -> {}; resetting stored collections",
                stored,
                SCHEMA_VERSION
            );
        }
        self.clear()?;
        atomic_write(&marker, &SCHEMA_VERSION.to_string())?;
        Ok(stored > 0)
    }

    /// Load a collection by name. `Ok(None)` when the file does not exist;
    /// unreadable or unparsable files are real errors.
    pub fn load_collection<T: DeserializeOwned>(
        &self,
        name: &str,
    ) -> Result<Option<Vec<T>>, StoreError> {
        let path = self.collection_path(name);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let items = serde_json::from_str(&content)?;
        Ok(Some(items))
    }

    /// Persist a collection, replacing the previous file atomically.
    pub fn save_collection<T: Serialize>(&self, name: &str, items: &[T]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(items)?;
        atomic_write(&self.collection_path(name), &json)?;
        log::debug!("saved {} item(s) to {}.json", items.len(), name);
        Ok(())
    }

    /// Remove every stored collection file, keeping the directory.
    pub fn clear(&self) -> Result<(), StoreError> {
        if !self.root.exists() {
            return Ok(());
        }
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }
}

/// Write via a temp file in the same directory, then rename into place, so
/// a crash mid-write never leaves a truncated collection behind.
fn atomic_write(path: &Path, contents: &str) -> Result<(), StoreError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}
