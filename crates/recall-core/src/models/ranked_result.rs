use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Which engine produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultSource {
    Keyword,
    Semantic,
    Hybrid,
    Graph,
}

/// A scored retrieval candidate. Value type, produced fresh per query;
/// never shared or mutated across queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    pub id: String,
    pub content: String,
    pub score: f64,
    pub source: ResultSource,
    /// Set by the re-ranker when a cross-encoder is wired in.
    pub rerank_score: Option<f64>,
    pub metadata: BTreeMap<String, String>,
}
