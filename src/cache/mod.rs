//! Cache Module
//!
//! Provides the in-memory response cache with lazy TTL expiration.

mod entry;
mod key;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::{CacheEntryInfo, CacheStore};
