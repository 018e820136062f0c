//! Cache Statistics Module
//!
//! Counters for the response cache. Expiry is lazy, so an expiration is only
//! observed by the lookup that finds the stale entry, and that lookup is a miss.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache counters, returned by value from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from a live entry
    pub hits: u64,
    /// Lookups that found no entry or an expired one
    pub misses: u64,
    /// Stale entries dropped by a lookup (a subset of `misses`)
    pub expirations: u64,
    /// Entries currently stored, live or not yet found stale
    pub total_entries: usize,
}

impl CacheStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `get` is exactly one hit or one miss.
    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// Share of lookups served from the cache; 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_expiration(&mut self) {
        self.expirations += 1;
        self.record_miss();
    }

    pub(crate) fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_stats_have_no_lookups() {
        let stats = CacheStats::new();
        assert_eq!(stats.lookups(), 0);
        assert_eq!(stats.hit_rate(), 0.0);
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn test_hit_rate_over_hits_and_misses() {
        let mut stats = CacheStats::new();
        for _ in 0..3 {
            stats.record_hit();
        }
        stats.record_miss();
        assert_eq!(stats.lookups(), 4);
        assert_eq!(stats.hit_rate(), 0.75);
    }

    #[test]
    fn test_expiration_is_also_a_miss() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_expiration();
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_serializes_for_json_output() {
        let mut stats = CacheStats::new();
        stats.set_total_entries(2);
        let value = serde_json::to_value(&stats).unwrap();
        assert_eq!(value["total_entries"], 2);
        assert_eq!(value["expirations"], 0);
    }
}
