use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval pipeline configuration.
///
/// These are tunable policy, not law: the fusion weights and the agentic
/// thresholds are heuristics. BM25's k1/b are deliberately *not* here —
/// they are fixed constants in `recall_core::constants`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub semantic_weight: f64,
    pub keyword_weight: f64,
    pub candidate_multiplier: usize,
    pub min_fusion_candidates: usize,
    pub rerank_candidate_cap: usize,
    pub graph_max_depth: usize,
    pub concept_similarity_floor: f64,
    pub short_query_max_words: usize,
    /// Deadline budget (ms) port adapters should enforce per external call.
    pub port_timeout_ms: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            semantic_weight: defaults::SEMANTIC_WEIGHT,
            keyword_weight: defaults::KEYWORD_WEIGHT,
            candidate_multiplier: defaults::CANDIDATE_MULTIPLIER,
            min_fusion_candidates: defaults::MIN_FUSION_CANDIDATES,
            rerank_candidate_cap: defaults::RERANK_CANDIDATE_CAP,
            graph_max_depth: defaults::GRAPH_MAX_DEPTH,
            concept_similarity_floor: defaults::CONCEPT_SIMILARITY_FLOOR,
            short_query_max_words: defaults::SHORT_QUERY_MAX_WORDS,
            port_timeout_ms: defaults::PORT_TIMEOUT_MS,
        }
    }
}
