//! Response Cache Module
//!
//! TTL key-value store holding serialized response bodies. TTL is the only
//! eviction trigger besides an explicit flush; there is no capacity limit.

use std::collections::HashMap;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheKey, CacheStats};

// == Response Cache ==
/// In-process response cache with per-entry TTL.
///
/// Shared between handlers as `Arc<RwLock<ResponseCache>>`. None of the
/// operations can fail.
#[derive(Debug)]
pub struct ResponseCache {
    /// Key-value storage
    entries: HashMap<CacheKey, CacheEntry>,
    /// Lookup counters
    stats: CacheStats,
    /// TTL in seconds applied when `set` gets no explicit TTL
    default_ttl: u64,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL in seconds for entries set without one (0 = never expire)
    pub fn new(default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
        }
    }

    // == Get ==
    /// Returns the cached value if present and not expired.
    ///
    /// An expired entry is removed before the lookup resolves, so a stale
    /// value is never returned even if the sweep has not run yet.
    pub fn get(&mut self, key: &CacheKey) -> Option<String> {
        let now = current_timestamp_ms();

        match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            Some(_) => {
                self.entries.remove(key);
                self.stats.record_expired(1);
                self.stats.record_miss();
                None
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Inserts or overwrites an entry, resetting its expiry to `now + ttl`.
    ///
    /// # Arguments
    /// * `ttl` - TTL in seconds; falls back to the cache-wide default when None
    pub fn set(&mut self, key: CacheKey, value: String, ttl: Option<u64>) {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.entries.insert(key, CacheEntry::new(value, ttl));
    }

    // == Flush All ==
    /// Removes every entry regardless of expiry. Returns how many were dropped.
    pub fn flush_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    // == Invalidate Prefix ==
    /// Removes every entry whose key is `path_prefix` or one of its sub-paths.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate_prefix(&mut self, path_prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, _| !key.is_under(path_prefix));
        before - self.entries.len()
    }

    // == Cleanup Expired ==
    /// Removes all expired entries. Returns the number removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = current_timestamp_ms();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the cache counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_keys(self.entries.len());
        stats
    }

    /// Returns the entry for `key` without touching counters or expiry.
    pub fn peek(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    /// Cache-wide default TTL in seconds.
    pub fn default_ttl(&self) -> u64 {
        self.default_ttl
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
