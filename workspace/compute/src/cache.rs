//! Two-tier expiring cache for chart configurations.
//!
//! The volatile tier is an unbounded in-process map that lives as long as the
//! cache object. The durable tier is any [`DurableStorage`]; entries are
//! stored under `<prefix><key>` as a JSON envelope `{"data": .., "timestamp": ..}`
//! and are only valid while `now - timestamp <= expiration`.
//!
//! Reads never fail: expired or unreadable durable entries are deleted and
//! reported as absent. Writes always update the volatile tier; when the
//! durable write fails the oldest namespaced entries are evicted and the
//! write is retried exactly once.

mod clock;
mod storage;

pub use clock::{Clock, ManualClock, SystemClock};
pub use storage::{DurableStorage, MemoryStorage};

use std::time::Duration;

use cached::{Cached, UnboundCache};
use common::GENERATION_CACHE_PREFIX;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace, warn};

use crate::error::CacheError;

/// Number of namespaced durable entries kept by an eviction pass.
pub const DEFAULT_MAX_RETAINED: usize = 50;

/// Lifetime of a durable entry unless configured otherwise.
pub const DEFAULT_EXPIRATION: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, PartialEq)]
pub struct CacheConfig {
    /// Namespace prepended to every durable key.
    pub prefix: String,
    pub expiration: Duration,
    pub max_retained: usize,
}

impl CacheConfig {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            expiration: DEFAULT_EXPIRATION,
            max_retained: DEFAULT_MAX_RETAINED,
        }
    }

    /// Configuration of the daily generation chart cache.
    pub fn generation() -> Self {
        Self::new(GENERATION_CACHE_PREFIX)
    }

    pub fn with_expiration(mut self, expiration: Duration) -> Self {
        self.expiration = expiration;
        self
    }

    fn durable_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }

    fn expiration_millis(&self) -> i64 {
        i64::try_from(self.expiration.as_millis()).unwrap_or(i64::MAX)
    }
}

#[derive(Serialize, Deserialize)]
struct CacheEnvelope<V> {
    data: V,
    timestamp: i64,
}

/// Only the timestamp of an envelope, used when ranking entries for eviction.
#[derive(Deserialize)]
struct EnvelopeStamp {
    timestamp: i64,
}

/// Expiring cache with a volatile and a durable tier.
pub struct ChartCache<V, S, C = SystemClock> {
    config: CacheConfig,
    volatile: UnboundCache<String, V>,
    durable: S,
    clock: C,
}

impl<V, S> ChartCache<V, S, SystemClock>
where
    V: Clone + Serialize + DeserializeOwned,
    S: DurableStorage,
{
    pub fn new(config: CacheConfig, durable: S) -> Self {
        Self::with_clock(config, durable, SystemClock)
    }
}

impl<V, S, C> ChartCache<V, S, C>
where
    V: Clone + Serialize + DeserializeOwned,
    S: DurableStorage,
    C: Clock,
{
    pub fn with_clock(config: CacheConfig, durable: S, clock: C) -> Self {
        Self {
            config,
            volatile: UnboundCache::new(),
            durable,
            clock,
        }
    }

    /// Returns the cached value for `key`, if any.
    ///
    /// The volatile tier is trusted without an expiration check. A durable
    /// hit is promoted into the volatile tier.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let volatile_key = key.to_string();
        if let Some(data) = self.volatile.cache_get(&volatile_key) {
            trace!(key, "Volatile cache hit");
            return Some(data.clone());
        }

        let durable_key = self.config.durable_key(key);
        let raw = self.durable.get_item(&durable_key)?;

        let envelope: CacheEnvelope<V> = match serde_json::from_str(&raw) {
            Ok(envelope) => envelope,
            Err(err) => {
                warn!(key = %durable_key, %err, "Discarding unreadable cache entry");
                self.durable.remove_item(&durable_key);
                return None;
            }
        };

        // A timestamp far enough from now to overflow the age counts as expired
        let age = match self.clock.now_millis().checked_sub(envelope.timestamp) {
            Some(age) if age <= self.config.expiration_millis() => age,
            age => {
                debug!(key = %durable_key, age_ms = ?age, "Cache entry expired");
                self.durable.remove_item(&durable_key);
                return None;
            }
        };

        trace!(key, age_ms = age, "Durable cache hit");
        self.volatile.cache_set(volatile_key, envelope.data.clone());
        Some(envelope.data)
    }

    /// Stores `data` under `key` in both tiers.
    ///
    /// The volatile tier is always updated. A failed durable write triggers
    /// [`evict_oldest`](Self::evict_oldest) and one retry; if the retry also
    /// fails its error is returned.
    pub fn set(&mut self, key: &str, data: V) -> Result<(), CacheError> {
        let timestamp = self.clock.now_millis();
        let encoded = serde_json::to_string(&CacheEnvelope {
            data: &data,
            timestamp,
        });
        self.volatile.cache_set(key.to_string(), data);
        let encoded = encoded?;

        let durable_key = self.config.durable_key(key);
        match self.durable.set_item(&durable_key, &encoded) {
            Ok(()) => {
                trace!(key = %durable_key, "Cache entry stored");
                Ok(())
            }
            Err(err) => {
                warn!(key = %durable_key, %err, "Durable cache is full, clearing oldest entries");
                let evicted = self.evict_oldest();
                debug!(evicted, "Evicted cache entries before retry");

                self.durable.set_item(&durable_key, &encoded).map_err(|err| {
                    error!(key = %durable_key, %err, "Durable cache write failed after eviction");
                    CacheError::from(err)
                })
            }
        }
    }

    /// Keeps only the newest `max_retained` namespaced durable entries and
    /// returns how many were deleted. Entries without a readable timestamp
    /// rank as the oldest.
    pub fn evict_oldest(&mut self) -> usize {
        let mut stamped: Vec<(String, i64)> = self
            .durable
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&self.config.prefix))
            .map(|key| {
                let timestamp = self
                    .durable
                    .get_item(&key)
                    .and_then(|raw| serde_json::from_str::<EnvelopeStamp>(&raw).ok())
                    .map(|stamp| stamp.timestamp)
                    .unwrap_or(0);
                (key, timestamp)
            })
            .collect();

        // Newest first
        stamped.sort_by(|a, b| b.1.cmp(&a.1));

        let stale: Vec<String> = stamped
            .into_iter()
            .skip(self.config.max_retained)
            .map(|(key, _)| key)
            .collect();
        for key in &stale {
            self.durable.remove_item(key);
        }
        stale.len()
    }

    /// Drops the volatile tier and every namespaced durable entry. Returns
    /// the number of durable entries removed.
    pub fn clear(&mut self) -> usize {
        self.volatile.cache_clear();
        let namespaced: Vec<String> = self
            .durable
            .keys()
            .into_iter()
            .filter(|key| key.starts_with(&self.config.prefix))
            .collect();
        for key in &namespaced {
            self.durable.remove_item(key);
        }
        namespaced.len()
    }

    pub fn volatile_len(&self) -> usize {
        self.volatile.cache_size()
    }

    pub fn durable(&self) -> &S {
        &self.durable
    }

    pub fn durable_mut(&mut self) -> &mut S {
        &mut self.durable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;

    const HOUR_MS: i64 = 60 * 60 * 1000;

    fn envelope(data: &str, timestamp: i64) -> String {
        serde_json::json!({ "data": data, "timestamp": timestamp }).to_string()
    }

    fn cache_with(
        storage: MemoryStorage,
        clock: &ManualClock,
    ) -> ChartCache<String, MemoryStorage, ManualClock> {
        ChartCache::with_clock(
            CacheConfig::new("test-cache-").with_expiration(Duration::from_millis(HOUR_MS as u64)),
            storage,
            clock.clone(),
        )
    }

    #[test]
    fn test_set_then_get_round_trip() {
        let clock = ManualClock::at(1_000);
        let mut cache = cache_with(MemoryStorage::new(), &clock);

        cache.set("chart", "config".to_string()).unwrap();

        assert_eq!(cache.get("chart").as_deref(), Some("config"));
        assert!(cache.durable().contains_key("test-cache-chart"));
    }

    #[test]
    fn test_durable_hit_is_promoted_to_volatile_tier() {
        let clock = ManualClock::at(10_000);
        let mut storage = MemoryStorage::new();
        storage
            .set_item("test-cache-chart", &envelope("stored", 9_000))
            .unwrap();
        let mut cache = cache_with(storage, &clock);

        assert_eq!(cache.volatile_len(), 0);
        assert_eq!(cache.get("chart").as_deref(), Some("stored"));
        assert_eq!(cache.volatile_len(), 1);

        // Served from memory even after the durable copy is gone
        cache.durable_mut().remove_item("test-cache-chart");
        assert_eq!(cache.get("chart").as_deref(), Some("stored"));
    }

    #[test]
    fn test_expired_entry_is_absent_and_deleted() {
        let now = 50 * HOUR_MS;
        let clock = ManualClock::at(now);
        let mut storage = MemoryStorage::new();
        storage
            .set_item("test-cache-chart", &envelope("old", now - HOUR_MS - 1))
            .unwrap();
        let mut cache = cache_with(storage, &clock);

        assert_eq!(cache.get("chart"), None);
        assert!(!cache.durable().contains_key("test-cache-chart"));
    }

    #[test]
    fn test_out_of_range_timestamp_is_absent_and_deleted() {
        let clock = ManualClock::at(1_700_000_000_000);
        let mut storage = MemoryStorage::new();
        storage
            .set_item("test-cache-chart", &envelope("ancient", i64::MIN))
            .unwrap();
        storage
            .set_item("test-cache-other", &envelope("negative", -(i64::MAX - 10)))
            .unwrap();
        let mut cache = cache_with(storage, &clock);

        assert_eq!(cache.get("chart"), None);
        assert_eq!(cache.get("other"), None);
        assert!(cache.durable().is_empty());
        assert_eq!(cache.volatile_len(), 0);
    }

    #[test]
    fn test_entry_at_exact_expiration_is_still_valid() {
        let now = 50 * HOUR_MS;
        let clock = ManualClock::at(now);
        let mut storage = MemoryStorage::new();
        storage
            .set_item("test-cache-chart", &envelope("edge", now - HOUR_MS))
            .unwrap();
        let mut cache = cache_with(storage, &clock);

        assert_eq!(cache.get("chart").as_deref(), Some("edge"));
    }

    #[test]
    fn test_volatile_tier_ignores_expiration() {
        let clock = ManualClock::at(0);
        let mut cache = cache_with(MemoryStorage::new(), &clock);
        cache.set("chart", "fresh".to_string()).unwrap();

        clock.advance(10 * HOUR_MS);

        assert_eq!(cache.get("chart").as_deref(), Some("fresh"));
        assert!(cache.durable().contains_key("test-cache-chart"));
    }

    #[test]
    fn test_corrupt_entry_self_heals() {
        let clock = ManualClock::at(0);
        let mut storage = MemoryStorage::new();
        storage.set_item("test-cache-chart", "{not json").unwrap();
        storage
            .set_item("test-cache-other", r#"{"timestamp": 0}"#)
            .unwrap();
        let mut cache = cache_with(storage, &clock);

        assert_eq!(cache.get("chart"), None);
        assert_eq!(cache.get("other"), None);
        assert!(cache.durable().is_empty());
    }

    #[test]
    fn test_full_storage_keeps_newest_fifty() {
        let clock = ManualClock::at(0);
        let mut cache = cache_with(MemoryStorage::with_capacity(50), &clock);

        for i in 0..50 {
            clock.advance(1);
            cache.set(&format!("k{i}"), format!("v{i}")).unwrap();
        }

        clock.advance(1);
        let err = cache.set("k50", "v50".to_string()).unwrap_err();
        assert!(matches!(
            err,
            CacheError::Storage(StorageError::QuotaExceeded { .. })
        ));

        let durable = cache.durable();
        assert_eq!(durable.len(), 50);
        assert!(durable.keys().iter().all(|k| k.starts_with("test-cache-")));
        assert!(durable.contains_key("test-cache-k0"));
        assert!(durable.contains_key("test-cache-k49"));

        // The failed write still landed in the volatile tier
        assert_eq!(cache.get("k50").as_deref(), Some("v50"));
    }

    #[test]
    fn test_eviction_frees_room_for_retry() {
        let clock = ManualClock::at(0);
        let mut storage = MemoryStorage::with_capacity(56);
        storage.set_item("unrelated", "keep me").unwrap();
        let mut cache = cache_with(storage, &clock);

        for i in 0..55 {
            clock.advance(1);
            cache.set(&format!("k{i}"), format!("v{i}")).unwrap();
        }

        clock.advance(1);
        cache.set("newest", "v".to_string()).unwrap();

        let durable = cache.durable();
        assert_eq!(durable.len(), 52);
        for i in 0..5 {
            assert!(!durable.contains_key(&format!("test-cache-k{i}")));
        }
        for i in 5..55 {
            assert!(durable.contains_key(&format!("test-cache-k{i}")));
        }
        assert!(durable.contains_key("test-cache-newest"));
        assert!(durable.contains_key("unrelated"));
    }

    #[test]
    fn test_unreadable_entries_are_evicted_first() {
        let clock = ManualClock::at(100);
        let mut cache = cache_with(MemoryStorage::new(), &clock);
        cache.config.max_retained = 2;

        cache.durable_mut().set_item("test-cache-broken", "???").unwrap();
        cache.set("a", "1".to_string()).unwrap();
        clock.advance(1);
        cache.set("b", "2".to_string()).unwrap();

        assert_eq!(cache.evict_oldest(), 1);
        assert!(!cache.durable().contains_key("test-cache-broken"));
        assert_eq!(cache.durable().len(), 2);
    }

    #[test]
    fn test_clear_only_touches_namespace() {
        let clock = ManualClock::at(0);
        let mut storage = MemoryStorage::new();
        storage.set_item("someone-else", "x").unwrap();
        let mut cache = cache_with(storage, &clock);
        cache.set("a", "1".to_string()).unwrap();
        cache.set("b", "2".to_string()).unwrap();

        assert_eq!(cache.clear(), 2);
        assert_eq!(cache.volatile_len(), 0);
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.durable().keys(), vec!["someone-else".to_string()]);
    }
}
