//! Cache Store Module
//!
//! Unbounded response cache with lazy TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{CacheEntry, CacheKey, CacheStats};

// == Cache Entry Info ==
/// Read-only view of an entry's timing, as returned by [`CacheStore::info`].
#[derive(Debug, Clone, Serialize)]
pub struct CacheEntryInfo {
    pub key: String,
    pub created_at: DateTime<Utc>,
    pub age: Duration,
    pub expires_in: Duration,
    pub expired: bool,
}

// == Cache Store ==
/// Response cache keyed by request fingerprint.
///
/// There is no size bound and no background sweeper: entries leave the map
/// when a lookup finds them expired, when they are removed explicitly, or on
/// [`CacheStore::clear`]. Callers that share a store across tasks wrap it in
/// `Arc<RwLock<_>>`; every method here is a single map-level operation.
#[derive(Debug)]
pub struct CacheStore<V> {
    entries: HashMap<CacheKey, CacheEntry<V>>,
    stats: CacheStats,
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    /// Configured time-to-live for new entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Stores a value, replacing any previous entry and resetting its expiry
    /// to now + TTL.
    pub fn set(&mut self, key: CacheKey, value: V) {
        self.entries.insert(key, CacheEntry::new(value, self.ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` when the key was never stored or its entry has expired;
    /// an expired entry is evicted as part of the lookup.
    pub fn get(&mut self, key: &CacheKey) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_expiration();
                None
            }
            Some(entry) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Remove ==
    /// Drops a single entry. Returns whether one was present.
    pub fn remove(&mut self, key: &CacheKey) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Info ==
    /// Describes an entry without touching counters or evicting it.
    pub fn info(&self, key: &CacheKey) -> Option<CacheEntryInfo> {
        self.entries.get(key).map(|entry| CacheEntryInfo {
            key: key.to_string(),
            created_at: entry.created_at,
            age: entry.age(),
            expires_in: entry.ttl_remaining(),
            expired: entry.is_expired(),
        })
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet looked up.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
