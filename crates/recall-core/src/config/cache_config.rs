use serde::{Deserialize, Serialize};

use super::defaults;

/// Result cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Capacity; the least-recently-used entry is evicted on overflow.
    /// Zero disables caching entirely.
    pub max_entries: usize,
    /// Entry lifetime in milliseconds; expiry is checked lazily on read.
    pub ttl_ms: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: defaults::CACHE_MAX_ENTRIES,
            ttl_ms: defaults::CACHE_TTL_MS,
        }
    }
}
