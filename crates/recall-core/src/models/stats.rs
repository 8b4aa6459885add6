use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Corpus statistics for one published index snapshot.
/// Recomputed atomically whenever the index is rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub average_document_length: f64,
}

/// Which external engines are currently usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineAvailability {
    /// Embedding provider and vector store both wired in.
    pub semantic: bool,
    pub graph: bool,
    pub reranker: bool,
}

/// Aggregate counters exposed by `get_stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineStats {
    /// Executed-mode counts, keyed by mode name. Agentic requests count
    /// under the mode they resolved to.
    pub per_mode_counts: BTreeMap<String, u64>,
    /// Hits over total cache lookups; 0.0 before the first lookup.
    pub cache_hit_rate: f64,
    pub availability: EngineAvailability,
    pub index: IndexStats,
}
