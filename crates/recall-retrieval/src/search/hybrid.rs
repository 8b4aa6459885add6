//! Keyword + semantic retrieval against one published snapshot.

use recall_core::config::RetrievalConfig;
use recall_core::models::{RankedResult, ResultSource, SearchMode};
use recall_core::traits::{IEmbeddingProvider, IVectorStore, Port};
use tracing::{debug, warn};

use crate::search::fusion;
use crate::snapshot::IndexSnapshot;

/// Runs keyword, semantic, or fused retrieval. Borrows the snapshot and the
/// ports for the duration of one query; owns nothing mutable.
pub struct HybridSearcher<'a> {
    snapshot: &'a IndexSnapshot,
    embedder: &'a Port<dyn IEmbeddingProvider>,
    vector_store: &'a Port<dyn IVectorStore>,
    config: &'a RetrievalConfig,
}

impl<'a> HybridSearcher<'a> {
    pub fn new(
        snapshot: &'a IndexSnapshot,
        embedder: &'a Port<dyn IEmbeddingProvider>,
        vector_store: &'a Port<dyn IVectorStore>,
        config: &'a RetrievalConfig,
    ) -> Self {
        Self {
            snapshot,
            embedder,
            vector_store,
            config,
        }
    }

    /// Dispatch on mode. Graph and Agentic never reach this component; the
    /// engine resolves both before first-stage retrieval runs.
    pub fn search(&self, query: &str, top_k: usize, mode: SearchMode) -> Vec<RankedResult> {
        match mode {
            SearchMode::Keyword => self.keyword(query, top_k),
            SearchMode::Semantic => self.semantic(query, top_k),
            SearchMode::Hybrid => self.hybrid(query, top_k),
            SearchMode::Graph | SearchMode::Agentic => Vec::new(),
        }
    }

    /// BM25 leg, raw scores.
    fn keyword(&self, query: &str, top_k: usize) -> Vec<RankedResult> {
        self.snapshot
            .bm25()
            .search(query, top_k)
            .into_iter()
            .map(|(pos, score)| self.result_at(pos, score, ResultSource::Keyword))
            .collect()
    }

    /// Vector leg. Any port failure degrades to an empty list, never an
    /// error.
    fn semantic(&self, query: &str, top_k: usize) -> Vec<RankedResult> {
        self.semantic_hits(query, top_k)
            .into_iter()
            .filter_map(|(id, score)| {
                self.snapshot
                    .position_of(&id)
                    .map(|pos| self.result_at(pos, score, ResultSource::Semantic))
            })
            .take(top_k)
            .collect()
    }

    /// Both legs fetched wide, min-max normalized, weight-fused.
    fn hybrid(&self, query: &str, top_k: usize) -> Vec<RankedResult> {
        let fetch = (top_k * self.config.candidate_multiplier).max(self.config.min_fusion_candidates);

        let mut keyword: Vec<(String, f64)> = self
            .snapshot
            .bm25()
            .search(query, fetch)
            .into_iter()
            .map(|(pos, score)| (self.snapshot.document(pos).id.clone(), score))
            .collect();
        let mut semantic = self.semantic_hits(query, fetch);
        // Drop vector hits for documents this snapshot does not hold; the
        // vector store may lag a reindex.
        semantic.retain(|(id, _)| self.snapshot.position_of(id).is_some());

        let fused = if semantic.is_empty() {
            // Explicit degraded path: keyword-only ranking with the keyword
            // weight renormalized to 1.0 so scores stay in [0, 1] and remain
            // comparable to healthy hybrid queries.
            debug!("semantic leg empty, hybrid degrades to keyword-only ranking");
            fusion::min_max_normalize(&mut keyword);
            fusion::fuse(&[], &keyword, 0.0, 1.0)
        } else {
            fusion::min_max_normalize(&mut semantic);
            fusion::min_max_normalize(&mut keyword);
            fusion::fuse(
                &semantic,
                &keyword,
                self.config.semantic_weight,
                self.config.keyword_weight,
            )
        };

        fused
            .into_iter()
            .filter_map(|(id, score)| {
                self.snapshot
                    .position_of(&id)
                    .map(|pos| self.result_at(pos, score, ResultSource::Hybrid))
            })
            .take(top_k)
            .collect()
    }

    /// `(doc_id, similarity)` pairs from the vector ports, or empty on any
    /// unavailability, timeout, or backend failure.
    fn semantic_hits(&self, query: &str, k: usize) -> Vec<(String, f64)> {
        let Some(embedder) = self.embedder.get() else {
            return Vec::new();
        };
        let Some(store) = self.vector_store.get() else {
            return Vec::new();
        };
        let vector = match embedder.embed(query) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "query embedding failed, semantic leg empty");
                return Vec::new();
            }
        };
        match store.nearest(&vector, k) {
            Ok(hits) => hits,
            Err(e) => {
                warn!(error = %e, "vector search failed, semantic leg empty");
                Vec::new()
            }
        }
    }

    fn result_at(&self, pos: usize, score: f64, source: ResultSource) -> RankedResult {
        let doc = self.snapshot.document(pos);
        RankedResult {
            id: doc.id.clone(),
            content: doc.content.clone(),
            score,
            source,
            rerank_score: None,
            metadata: doc.metadata.clone(),
        }
    }
}
