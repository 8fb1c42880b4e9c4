use std::cell::RefCell;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use compute::cache::{CacheConfig, ChartCache};
use compute::pipeline::GenerationCache;
use tracing::debug;

use crate::file_storage::FileStorage;

/// Name of the file holding the durable cache inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Client settings, read from flags or the environment.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the chart API
    #[arg(long, env = "ENERGIA_API_URL", default_value = "http://localhost:8000/api")]
    pub api_url: String,

    /// Directory holding the durable chart cache
    #[arg(long, env = "ENERGIA_CACHE_DIR", default_value = ".energia-cache")]
    pub cache_dir: PathBuf,

    /// Lifetime of a cached chart in milliseconds
    #[arg(long, env = "ENERGIA_CACHE_EXPIRATION_MS", default_value_t = 3_600_000)]
    pub cache_expiration_ms: u64,

    /// Maximum size of the durable cache in bytes
    #[arg(long, env = "ENERGIA_CACHE_QUOTA_BYTES", default_value_t = 5 * 1024 * 1024)]
    pub cache_quota_bytes: usize,
}

impl ClientConfig {
    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::generation().with_expiration(Duration::from_millis(self.cache_expiration_ms))
    }

    /// Opens the generation chart cache backed by the cache file.
    pub fn open_cache(&self) -> Result<RefCell<GenerationCache<FileStorage>>> {
        let path = self.cache_file();
        debug!("Opening chart cache at {}", path.display());
        let storage = FileStorage::open(path, self.cache_quota_bytes)?;
        Ok(RefCell::new(ChartCache::new(self.cache_config(), storage)))
    }
}
