use crate::error::{StorageError, StorageResult};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the JSON file holding every key
    pub path: PathBuf,

    /// Whether to create the file (and its directory) if it doesn't exist
    pub create_if_missing: bool,

    /// Whether to pretty-print the JSON on disk
    pub pretty: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gatelink.json"),
            create_if_missing: true,
            pretty: true,
        }
    }
}

impl StoreConfig {
    /// Create a new store configuration with the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Set whether to create the file if it doesn't exist
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    /// Set whether to pretty-print the JSON on disk
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// String key-value persistence.
///
/// Values are opaque strings; structured values are stored as JSON text.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// Volatile store, mostly for tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object on disk.
///
/// The whole file is rewritten on every `set` and `remove`.
#[derive(Debug)]
pub struct FileStore {
    config: StoreConfig,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store described by `config`.
    ///
    /// # Errors
    /// - `StorageError::Configuration` if the file is missing and
    ///   `create_if_missing` is off, or its directory cannot be created
    /// - `StorageError::CorruptStore` if the file is not a JSON object of strings
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gatelink_storage::{FileStore, KeyValueStore, StoreConfig};
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = StoreConfig::new("gatelink.json").pretty(false);
    /// let mut store = FileStore::open(config)?;
    /// store.set("unitNumber", "+32470000000")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(config: StoreConfig) -> StorageResult<Self> {
        let entries = if config.path.exists() {
            Self::read_entries(&config.path)?
        } else if config.create_if_missing {
            if let Some(parent) = config.path.parent()
                && !parent.as_os_str().is_empty()
                && !parent.exists()
            {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Configuration(format!("Failed to create store directory: {}", e))
                })?;
            }
            BTreeMap::new()
        } else {
            return Err(StorageError::Configuration(format!(
                "Store file {} does not exist",
                config.path.display()
            )));
        };

        info!(path = %config.path.display(), keys = entries.len(), "Settings store opened");

        let store = Self { config, entries };
        if !store.config.path.exists() {
            store.flush()?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn read_entries(path: &Path) -> StorageResult<BTreeMap<String, String>> {
        let raw = fs::read_to_string(path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw).map_err(|e| StorageError::CorruptStore {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    fn flush(&self) -> StorageResult<()> {
        let json = if self.config.pretty {
            serde_json::to_string_pretty(&self.entries)
        } else {
            serde_json::to_string(&self.entries)
        }
        .map_err(|e| StorageError::serialization("<store>", e))?;

        // Write next to the target, then swap it in.
        let tmp = self.config.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.config.path)?;

        debug!(path = %self.config.path.display(), "Settings store flushed");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_builder() {
        let config = StoreConfig::new("/tmp/x.json")
            .create_if_missing(false)
            .pretty(false);
        assert_eq!(config.path, PathBuf::from("/tmp/x.json"));
        assert!(!config.create_if_missing);
        assert!(!config.pretty);

        let default = StoreConfig::default();
        assert_eq!(default.path, PathBuf::from("gatelink.json"));
        assert!(default.create_if_missing);
        assert!(default.pretty);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.is_empty());

        store.set("password", "1234").unwrap();
        assert_eq!(store.get("password").unwrap().as_deref(), Some("1234"));
        assert_eq!(store.len(), 1);

        store.remove("password").unwrap();
        assert_eq!(store.get("password").unwrap(), None);
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        let mut store = FileStore::open(StoreConfig::new(&path)).unwrap();
        assert!(path.exists());
        store.set("unitNumber", "+32470000000").unwrap();
        store.set("password", "6666").unwrap();
        store.remove("password").unwrap();

        let reopened = FileStore::open(StoreConfig::new(&path)).unwrap();
        assert_eq!(
            reopened.get("unitNumber").unwrap().as_deref(),
            Some("+32470000000")
        );
        assert_eq!(reopened.get("password").unwrap(), None);
    }

    #[test]
    fn test_file_store_missing_without_create() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("absent.json")).create_if_missing(false);

        assert!(matches!(
            FileStore::open(config),
            Err(StorageError::Configuration(_))
        ));
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        assert!(matches!(
            FileStore::open(StoreConfig::new(&path)),
            Err(StorageError::CorruptStore { .. })
        ));
    }

    #[test]
    fn test_file_store_compact_output() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(StoreConfig::new(&path).pretty(false)).unwrap();
        store.set("password", "1234").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert_eq!(raw, r#"{"password":"1234"}"#);
    }
}
