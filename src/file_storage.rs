//! Durable cache tier kept in a single JSON file.
//!
//! Mirrors browser `localStorage`: string keys and values, a byte quota
//! over all entries, and a write that fails once the quota is exhausted.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use compute::cache::DurableStorage;
use compute::error::StorageError;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum FileStorageError {
    #[error("failed to read cache file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    quota_bytes: usize,
}

fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

impl FileStorage {
    /// Loads `path`, starting empty when the file is missing or unreadable
    /// as JSON.
    pub fn open(path: impl Into<PathBuf>, quota_bytes: usize) -> Result<Self, FileStorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| FileStorageError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let entries = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                warn!("Discarding corrupt cache file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(FileStorageError::Read { path, source }),
        };

        debug!("Opened {} with {} entries", path.display(), entries.len());
        Ok(Self {
            path,
            entries,
            quota_bytes,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| entry_size(k, v)).sum()
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(&self.entries).map_err(|e| StorageError::Io(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl DurableStorage for FileStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let replaced = self.entries.get(key).map_or(0, |v| entry_size(key, v));
        let needed = self.used_bytes() - replaced + entry_size(key, value);
        if needed > self.quota_bytes {
            debug!("Quota of {} bytes exceeded writing {}", self.quota_bytes, key);
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }

        let previous = self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement
            match previous {
                Some(previous) => self.entries.insert(key.to_string(), previous),
                None => self.entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            if let Err(e) = self.persist() {
                warn!("Failed to persist removal of {}: {}", key, e);
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
