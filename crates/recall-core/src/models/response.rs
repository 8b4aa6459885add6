use serde::{Deserialize, Serialize};

use super::RankedResult;

/// Retrieval strategies.
///
/// `Agentic` is a request-time value only: the strategy selector always
/// resolves it to one of the other four before any engine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    Semantic,
    Keyword,
    Hybrid,
    Graph,
    Agentic,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Semantic => "semantic",
            Self::Keyword => "keyword",
            Self::Hybrid => "hybrid",
            Self::Graph => "graph",
            Self::Agentic => "agentic",
        }
    }
}

/// The strategy selector's verdict for an agentic query.
/// Attached to the response metadata, not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyDecision {
    /// Never `Agentic`.
    pub method: SearchMode,
    pub reasoning: String,
    /// Selector confidence in [0, 1].
    pub confidence: f64,
}

/// What `retrieve` hands back to callers. Always produced, even in total
/// external-port outage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalResponse {
    pub results: Vec<RankedResult>,
    pub from_cache: bool,
    pub method_used: SearchMode,
    pub reasoning: String,
    pub elapsed_ms: f64,
}

impl RetrievalResponse {
    /// An empty response for degenerate inputs (blank query, zero top_k).
    pub fn empty(method_used: SearchMode, reasoning: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            from_cache: false,
            method_used,
            reasoning: reasoning.into(),
            elapsed_ms: 0.0,
        }
    }
}
