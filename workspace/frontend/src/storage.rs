//! Browser backend for the durable cache tier and the process-wide
//! generation chart cache.

use std::cell::RefCell;
use std::rc::Rc;

use compute::cache::{CacheConfig, ChartCache, DurableStorage, MemoryStorage};
use compute::error::StorageError;
use compute::pipeline::GenerationCache;
use web_sys::{window, Storage};

use crate::settings;

/// `localStorage`, or an in-memory map when the browser refuses access
/// (private mode, disabled storage).
pub enum BrowserStorage {
    Local(Storage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    pub fn open() -> Self {
        match window().and_then(|w| w.local_storage().ok().flatten()) {
            Some(storage) => Self::Local(storage),
            None => {
                log::warn!("localStorage unavailable, chart cache will not persist");
                Self::Memory(MemoryStorage::new())
            }
        }
    }
}

impl DurableStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(|e| {
                log::warn!("localStorage rejected {}: {:?}", key, e);
                StorageError::QuotaExceeded {
                    key: key.to_string(),
                }
            }),
            Self::Memory(storage) => storage.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) {
        match self {
            Self::Local(storage) => {
                if let Err(e) = storage.remove_item(key) {
                    log::warn!("Failed to remove {} from localStorage: {:?}", key, e);
                }
            }
            Self::Memory(storage) => storage.remove_item(key),
        }
    }

    fn keys(&self) -> Vec<String> {
        match self {
            Self::Local(storage) => {
                let len = storage.length().unwrap_or(0);
                (0..len)
                    .filter_map(|idx| storage.key(idx).ok().flatten())
                    .collect()
            }
            Self::Memory(storage) => storage.keys(),
        }
    }
}

pub type SharedGenerationCache = Rc<RefCell<GenerationCache<BrowserStorage>>>;

thread_local! {
    // Shared by every generation widget for the lifetime of the page
    static GENERATION_CACHE: SharedGenerationCache = Rc::new(RefCell::new(ChartCache::new(
        CacheConfig::generation().with_expiration(settings::get_settings().cache_expiration()),
        BrowserStorage::open(),
    )));
}

pub fn generation_cache() -> SharedGenerationCache {
    GENERATION_CACHE.with(Rc::clone)
}
