//! Cache Entry Module
//!
//! Defines the structure for individual cached responses with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::Instant;

// == Cache Entry ==
/// A single cached response with its expiry deadline.
///
/// Deadlines are measured on the tokio clock so that paused-time tests can
/// advance past them without sleeping.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored response payload
    pub value: V,
    /// Wall-clock creation time, reported by cache inspection
    pub created_at: DateTime<Utc>,
    /// Monotonic insertion instant
    pub inserted_at: Instant,
    /// Monotonic expiry deadline; `None` when the TTL runs past the clock's range
    pub expires_at: Option<Instant>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` from now.
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: Utc::now(),
            inserted_at: now,
            expires_at: now.checked_add(ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so a zero TTL entry is never served.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|deadline| Instant::now() >= deadline)
    }

    // == Age ==
    /// Time elapsed since the entry was stored.
    pub fn age(&self) -> Duration {
        Instant::now().saturating_duration_since(self.inserted_at)
    }

    // == Time To Live ==
    /// Remaining lifetime, `Duration::ZERO` once expired and `Duration::MAX`
    /// for an entry that never expires.
    pub fn ttl_remaining(&self) -> Duration {
        match self.expires_at {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => Duration::MAX,
        }
    }
}
