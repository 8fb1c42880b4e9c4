use std::collections::BTreeMap;

use crate::error::StorageError;

/// Persistent string key-value store backing the durable cache tier.
///
/// Reads are infallible: a backend that cannot read reports the key as
/// absent. Writes may fail, typically when a quota is exceeded.
pub trait DurableStorage {
    fn get_item(&self, key: &str) -> Option<String>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str);

    /// Every key currently stored, in no particular order.
    fn keys(&self) -> Vec<String>;
}

/// In-memory durable backend with an optional entry limit.
///
/// Used by tests and as the fallback when no persistent store is available.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
    capacity: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuses to store more than `capacity` distinct keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: Some(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl DurableStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let is_new = !self.entries.contains_key(key);
        if is_new && self.capacity.is_some_and(|capacity| self.entries.len() >= capacity) {
            return Err(StorageError::QuotaExceeded {
                key: key.to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_limits_new_keys_only() {
        let mut storage = MemoryStorage::with_capacity(1);
        storage.set_item("a", "1").unwrap();

        // Overwriting an existing key never needs extra room
        storage.set_item("a", "2").unwrap();
        assert_eq!(storage.get_item("a").as_deref(), Some("2"));

        let err = storage.set_item("b", "3").unwrap_err();
        assert_eq!(err, StorageError::QuotaExceeded { key: "b".to_string() });
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_remove_and_keys() {
        let mut storage = MemoryStorage::new();
        storage.set_item("x", "1").unwrap();
        storage.set_item("y", "2").unwrap();
        storage.remove_item("x");

        assert_eq!(storage.keys(), vec!["y".to_string()]);
        assert!(!storage.contains_key("x"));
    }
}
