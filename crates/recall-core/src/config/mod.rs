mod cache_config;
mod retrieval_config;

use serde::{Deserialize, Serialize};

pub use cache_config::CacheConfig;
pub use retrieval_config::RetrievalConfig;

/// Default values shared by the config structs.
pub mod defaults {
    /// Hybrid fusion weight for the semantic leg.
    pub const SEMANTIC_WEIGHT: f64 = 0.7;
    /// Hybrid fusion weight for the keyword leg.
    pub const KEYWORD_WEIGHT: f64 = 0.3;
    /// Per-leg candidate count is `top_k * multiplier`, floored below.
    pub const CANDIDATE_MULTIPLIER: usize = 2;
    pub const MIN_FUSION_CANDIDATES: usize = 10;
    /// Latency cap on cross-encoder calls per query.
    pub const RERANK_CANDIDATE_CAP: usize = 50;
    pub const GRAPH_MAX_DEPTH: usize = 2;
    /// Minimum query-to-concept similarity for graph search to apply.
    pub const CONCEPT_SIMILARITY_FLOOR: f64 = 0.5;
    /// Agentic rule 1: queries at or under this word count go to keyword.
    pub const SHORT_QUERY_MAX_WORDS: usize = 3;
    /// Deadline budget port adapters should enforce on external calls.
    pub const PORT_TIMEOUT_MS: u64 = 2_000;
    pub const CACHE_MAX_ENTRIES: usize = 256;
    pub const CACHE_TTL_MS: u64 = 300_000;
}

/// Top-level configuration, loadable from TOML. Missing sections and fields
/// fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallConfig {
    pub retrieval: RetrievalConfig,
    pub cache: CacheConfig,
}

impl RecallConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }
}
