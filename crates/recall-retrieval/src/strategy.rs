//! Agentic strategy selection.
//!
//! Ordered heuristics resolve `SearchMode::Agentic` to a concrete engine
//! and produce a reasoning trace for the response metadata. First matching
//! rule wins.

use recall_core::config::RetrievalConfig;
use recall_core::models::{SearchMode, StrategyDecision};

/// Phrases that signal a breadth-oriented, search-intent query.
const SEARCH_INTENT_PHRASES: &[&str] = &[
    "find", "example", "examples", "list", "show me", "search", "look up",
];

pub struct StrategySelector {
    short_query_max_words: usize,
}

impl StrategySelector {
    pub fn new(config: &RetrievalConfig) -> Self {
        Self {
            short_query_max_words: config.short_query_max_words,
        }
    }

    /// Resolve an agentic query to a concrete mode.
    ///
    /// `concept_match` is the graph expander's verdict for this query and
    /// `graph_available` whether the graph port is wired in; rule 2 needs
    /// both. The returned method is never `Agentic`.
    pub fn select(
        &self,
        query: &str,
        concept_match: Option<&str>,
        graph_available: bool,
    ) -> StrategyDecision {
        let word_count = query.split_whitespace().count();
        if word_count <= self.short_query_max_words {
            return StrategyDecision {
                method: SearchMode::Keyword,
                reasoning: format!("short query ({word_count} words) favors exact term match"),
                confidence: 0.9,
            };
        }

        if let Some(concept) = concept_match {
            if graph_available {
                return StrategyDecision {
                    method: SearchMode::Graph,
                    reasoning: format!("conceptual query maps to known topic '{concept}'"),
                    confidence: 0.85,
                };
            }
        }

        let lower = query.to_lowercase();
        if SEARCH_INTENT_PHRASES.iter().any(|p| lower.contains(p)) {
            return StrategyDecision {
                method: SearchMode::Hybrid,
                reasoning: "breadth-oriented query benefits from combined retrieval".to_string(),
                confidence: 0.75,
            };
        }

        StrategyDecision {
            method: SearchMode::Hybrid,
            reasoning: "no strong signal, defaulting to combined retrieval".to_string(),
            confidence: 0.6,
        }
    }
}
