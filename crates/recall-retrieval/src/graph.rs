//! Knowledge-graph expansion.
//!
//! Maps a query onto a known concept, walks prerequisite/related/part-of
//! edges breadth-first through the external graph port, and retrieves the
//! documents tagged with each concept on the path. Graph structure itself
//! lives behind `IGraphStore`; this side owns matching, walking, and depth
//! accounting.

use std::collections::{HashSet, VecDeque};

use recall_core::config::RetrievalConfig;
use recall_core::models::{RankedResult, RelationKind, ResultSource};
use recall_core::traits::{IGraphStore, Port};
use tracing::warn;

use crate::snapshot::IndexSnapshot;
use crate::tokenizer::tokenize;

pub struct GraphExpander {
    port: Port<dyn IGraphStore>,
    similarity_floor: f64,
    max_depth: usize,
}

impl GraphExpander {
    pub fn new(port: Port<dyn IGraphStore>, config: &RetrievalConfig) -> Self {
        Self {
            port,
            similarity_floor: config.concept_similarity_floor,
            max_depth: config.graph_max_depth,
        }
    }

    pub fn is_available(&self) -> bool {
        self.port.is_available()
    }

    /// The concept this query is about, if any clears the similarity floor.
    ///
    /// Substring containment in either direction counts as a full match;
    /// otherwise the score is the fraction of the concept's terms present
    /// in the query. Port failure means no match, never an error.
    pub fn is_applicable(&self, query: &str) -> Option<String> {
        let store = self.port.get()?;
        let concepts = match store.known_concepts() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "graph port failed listing concepts");
                return None;
            }
        };

        let query_lower = query.to_lowercase();
        let query_terms: HashSet<String> = tokenize(query).into_iter().collect();

        let mut best: Option<(String, f64)> = None;
        for concept in concepts {
            let score = concept_similarity(&query_lower, &query_terms, &concept);
            if score > self.similarity_floor
                && best.as_ref().map_or(true, |(_, s)| score > *s)
            {
                best = Some((concept, score));
            }
        }
        best.map(|(concept, _)| concept)
    }

    /// Breadth-first expansion from `concept`, closest first.
    ///
    /// Returns `(concept, depth)` pairs including the origin at depth 0.
    /// A port failure mid-walk keeps the partial expansion gathered so far.
    pub fn expand(&self, concept: &str, max_depth: usize) -> Vec<(String, usize)> {
        let Some(store) = self.port.get() else {
            return Vec::new();
        };

        let mut visited: HashSet<String> = HashSet::new();
        visited.insert(concept.to_lowercase());
        let mut queue: VecDeque<(String, usize)> = VecDeque::new();
        queue.push_back((concept.to_string(), 0));
        let mut path = Vec::new();

        while let Some((name, depth)) = queue.pop_front() {
            path.push((name.clone(), depth));
            if depth >= max_depth {
                continue;
            }
            let neighbors = match store.neighbors(&name, &RelationKind::ALL) {
                Ok(n) => n,
                Err(e) => {
                    warn!(concept = %name, error = %e, "graph walk truncated");
                    break;
                }
            };
            for neighbor in neighbors {
                if visited.insert(neighbor.concept.to_lowercase()) {
                    queue.push_back((neighbor.concept, depth + 1));
                }
            }
        }
        path
    }

    /// Graph-driven retrieval, scored by inverse graph distance.
    ///
    /// Empty when no concept matches or the port is down; the engine falls
    /// back to hybrid in that case.
    pub fn search(
        &self,
        query: &str,
        top_k: usize,
        snapshot: &IndexSnapshot,
    ) -> Vec<RankedResult> {
        let Some(concept) = self.is_applicable(query) else {
            return Vec::new();
        };

        let mut results = Vec::new();
        let mut seen: HashSet<usize> = HashSet::new();
        for (name, depth) in self.expand(&concept, self.max_depth) {
            for &pos in snapshot.documents_for_concept(&name) {
                if !seen.insert(pos) {
                    continue;
                }
                let doc = snapshot.document(pos);
                results.push(RankedResult {
                    id: doc.id.clone(),
                    content: doc.content.clone(),
                    score: 1.0 / (1.0 + depth as f64),
                    source: ResultSource::Graph,
                    rerank_score: None,
                    metadata: doc.metadata.clone(),
                });
            }
            if results.len() >= top_k {
                break;
            }
        }
        results.truncate(top_k);
        results
    }
}

fn concept_similarity(query_lower: &str, query_terms: &HashSet<String>, concept: &str) -> f64 {
    let concept_lower = concept.to_lowercase();
    if query_lower.contains(&concept_lower) || concept_lower.contains(query_lower) {
        return 1.0;
    }
    let concept_terms = tokenize(concept);
    if concept_terms.is_empty() {
        return 0.0;
    }
    let overlap = concept_terms
        .iter()
        .filter(|t| query_terms.contains(*t))
        .count();
    overlap as f64 / concept_terms.len() as f64
}
