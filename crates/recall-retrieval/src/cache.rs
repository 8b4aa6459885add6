//! TTL + LRU cache of ranked result lists.
//!
//! Expiry is checked lazily on read; eviction removes the least recently
//! used entry, with both reads and writes refreshing recency. Entries are
//! never mutated in place, only replaced. The cache carries its own lock,
//! independent of the index lock.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use recall_core::models::{RankedResult, SearchMode};

/// Stable key over the full request shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// blake3 hex digest of a canonical request encoding. The query is
    /// trimmed and lowercased; filters fold in sorted order, so map
    /// iteration can never produce two keys for one request.
    pub fn compute(
        query: &str,
        mode: SearchMode,
        top_k: usize,
        filters: &BTreeMap<String, String>,
    ) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(query.trim().to_lowercase().as_bytes());
        hasher.update(&[0]);
        hasher.update(mode.as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(&(top_k as u64).to_le_bytes());
        for (key, value) in filters {
            hasher.update(&[0]);
            hasher.update(key.as_bytes());
            hasher.update(&[1]);
            hasher.update(value.as_bytes());
        }
        Self(hasher.finalize().to_hex().to_string())
    }
}

struct Entry {
    results: Vec<RankedResult>,
    created_at: Instant,
    /// Recency stamp from the shared clock; smallest is evicted first.
    last_used: u64,
}

#[derive(Default)]
struct Inner {
    entries: HashMap<CacheKey, Entry>,
    clock: u64,
    hits: u64,
    misses: u64,
}

pub struct ResultCache {
    inner: Mutex<Inner>,
    max_entries: usize,
    ttl: Duration,
}

impl ResultCache {
    /// A cache holding up to `max_entries` lists for `ttl` each.
    /// `max_entries == 0` disables storage; every lookup misses.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            max_entries,
            ttl,
        }
    }

    /// Cached results, unless absent or expired. Hits refresh recency.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<RankedResult>> {
        let mut inner = self.lock();

        let expired = inner
            .entries
            .get(key)
            .is_some_and(|e| e.created_at.elapsed() > self.ttl);
        if expired {
            inner.entries.remove(key);
        }

        inner.clock += 1;
        let clock = inner.clock;
        match inner.entries.get_mut(key) {
            Some(entry) => {
                entry.last_used = clock;
                let results = entry.results.clone();
                inner.hits += 1;
                Some(results)
            }
            None => {
                inner.misses += 1;
                None
            }
        }
    }

    /// Insert, evicting the least-recently-used entry at capacity.
    pub fn insert(&self, key: CacheKey, results: Vec<RankedResult>) {
        if self.max_entries == 0 {
            return;
        }
        let mut inner = self.lock();

        if !inner.entries.contains_key(&key) && inner.entries.len() >= self.max_entries {
            if let Some(lru) = inner
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(k, _)| k.clone())
            {
                inner.entries.remove(&lru);
            }
        }

        inner.clock += 1;
        let entry = Entry {
            results,
            created_at: Instant::now(),
            last_used: inner.clock,
        };
        inner.entries.insert(key, entry);
    }

    /// Drop all entries immediately. Hit/miss counters survive.
    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hits over total lookups; 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        let inner = self.lock();
        let total = inner.hits + inner.misses;
        if total == 0 {
            0.0
        } else {
            inner.hits as f64 / total as f64
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned cache is still a valid cache; the data is replaceable.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
