//! RetrievalEngine: the façade the rest of the system calls.
//!
//! `index_content` normalizes heterogeneous study items into documents and
//! publishes a fresh immutable snapshot; `retrieve` runs cache probe →
//! strategy resolution → first-stage retrieval (with graph-to-hybrid
//! fallback) → re-ranking → cache store. Every external port failure
//! degrades; `retrieve` always returns a response.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};

use recall_core::config::RecallConfig;
use recall_core::models::{
    ContentItem, ContentType, Document, EngineAvailability, EngineStats, IndexStats,
    RetrievalResponse, SearchMode, StrategyDecision,
};
use recall_core::traits::{ICrossEncoder, IEmbeddingProvider, IGraphStore, IVectorStore, Port};
use recall_core::{IndexError, RecallResult};
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, ResultCache};
use crate::graph::GraphExpander;
use crate::ranking::ReRanker;
use crate::search::HybridSearcher;
use crate::snapshot::IndexSnapshot;
use crate::strategy::StrategySelector;

pub struct RetrievalEngine {
    /// The published index. Readers clone the Arc and release the lock
    /// before any port I/O; writers swap in a fully built snapshot.
    snapshot: RwLock<Arc<IndexSnapshot>>,
    /// Single-writer guard for indexing. A second concurrent indexer is
    /// rejected, not queued.
    reindex: Mutex<()>,
    embedder: Port<dyn IEmbeddingProvider>,
    vector_store: Port<dyn IVectorStore>,
    graph: GraphExpander,
    reranker: ReRanker,
    selector: StrategySelector,
    cache: ResultCache,
    config: RecallConfig,
    mode_counts: Mutex<BTreeMap<String, u64>>,
}

impl RetrievalEngine {
    /// Wire up the engine from explicit dependencies. No ambient state:
    /// whoever bootstraps the process owns construction.
    pub fn new(
        config: RecallConfig,
        embedder: Port<dyn IEmbeddingProvider>,
        vector_store: Port<dyn IVectorStore>,
        graph_store: Port<dyn IGraphStore>,
        cross_encoder: Port<dyn ICrossEncoder>,
    ) -> Self {
        let graph = GraphExpander::new(graph_store, &config.retrieval);
        let reranker = ReRanker::new(cross_encoder, config.retrieval.rerank_candidate_cap);
        let selector = StrategySelector::new(&config.retrieval);
        let cache = ResultCache::new(
            config.cache.max_entries,
            Duration::from_millis(config.cache.ttl_ms),
        );
        Self {
            snapshot: RwLock::new(Arc::new(IndexSnapshot::empty())),
            reindex: Mutex::new(()),
            embedder,
            vector_store,
            graph,
            reranker,
            selector,
            cache,
            config,
            mode_counts: Mutex::new(BTreeMap::new()),
        }
    }

    /// Normalize raw items and publish a fresh index snapshot.
    ///
    /// The snapshot is built fully off to the side; concurrent retrievals
    /// see either the old corpus or the new one, never a partial index.
    /// Embedding hand-off to the vector store happens after publish and
    /// outside the index lock; failures there are logged, not retried.
    pub fn index_content(&self, content_type: &str, items: &[ContentItem]) -> RecallResult<()> {
        let _guard = self
            .reindex
            .try_lock()
            .map_err(|_| IndexError::ReindexInProgress)?;

        let content_type = ContentType::parse(content_type)?;
        let documents = items
            .iter()
            .map(|item| Document::from_item(content_type, item))
            .collect::<Result<Vec<_>, _>>()?;

        let next = Arc::new(IndexSnapshot::build(documents)?);
        let stats = next.stats();
        {
            let mut slot = self.write_slot();
            *slot = Arc::clone(&next);
        }
        info!(
            content_type = content_type.as_str(),
            documents = stats.document_count,
            "published index snapshot"
        );

        self.upsert_embeddings(&next);
        Ok(())
    }

    /// The full retrieval pipeline. Always returns a response, even in
    /// total external-port outage; blank queries and `top_k == 0` yield an
    /// empty response rather than an error.
    pub fn retrieve(
        &self,
        query: &str,
        user_id: &str,
        mode: SearchMode,
        top_k: usize,
        filters: &BTreeMap<String, String>,
    ) -> RetrievalResponse {
        let started = Instant::now();

        if query.trim().is_empty() {
            return RetrievalResponse::empty(mode, "empty query");
        }
        if top_k == 0 {
            return RetrievalResponse::empty(mode, "top_k is zero");
        }

        let key = CacheKey::compute(query, mode, top_k, filters);
        if let Some(results) = self.cache.get(&key) {
            debug!(user = user_id, "cache hit");
            return RetrievalResponse {
                results,
                from_cache: true,
                method_used: mode,
                reasoning: "served from cache".to_string(),
                elapsed_ms: elapsed_ms(started),
            };
        }

        // Grab the published snapshot once; all port I/O runs off-lock
        // against this corpus.
        let snapshot = self.read_snapshot();
        let decision = self.resolve_mode(query, mode);
        debug!(
            user = user_id,
            requested = mode.as_str(),
            resolved = decision.method.as_str(),
            "strategy resolved"
        );

        let searcher = HybridSearcher::new(
            &snapshot,
            &self.embedder,
            &self.vector_store,
            &self.config.retrieval,
        );

        let mut method_used = decision.method;
        let mut reasoning = decision.reasoning;
        let results = match decision.method {
            SearchMode::Graph => {
                let graph_results = self.graph.search(query, top_k, &snapshot);
                if graph_results.is_empty() {
                    // Hard contract: a down graph port or a dry expansion
                    // retries as hybrid before returning.
                    method_used = SearchMode::Hybrid;
                    reasoning = format!("{reasoning}; graph yielded nothing, fell back to hybrid");
                    searcher.search(query, top_k, SearchMode::Hybrid)
                } else {
                    graph_results
                }
            }
            method => searcher.search(query, top_k, method),
        };

        let mut results = self.reranker.rerank(query, results, top_k);
        if !filters.is_empty() {
            results.retain(|r| {
                filters
                    .iter()
                    .all(|(k, v)| r.metadata.get(k) == Some(v))
            });
        }

        self.cache.insert(key, results.clone());
        self.bump_mode(method_used);
        info!(
            user = user_id,
            method = method_used.as_str(),
            results = results.len(),
            "retrieval complete"
        );

        RetrievalResponse {
            results,
            from_cache: false,
            method_used,
            reasoning,
            elapsed_ms: elapsed_ms(started),
        }
    }

    /// Per-mode execution counts, cache hit rate, engine availability.
    pub fn get_stats(&self) -> EngineStats {
        let per_mode_counts = self
            .mode_counts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        EngineStats {
            per_mode_counts,
            cache_hit_rate: self.cache.hit_rate(),
            availability: EngineAvailability {
                semantic: self.embedder.is_available() && self.vector_store.is_available(),
                graph: self.graph.is_available(),
                reranker: self.reranker.is_available(),
            },
            index: self.index_stats(),
        }
    }

    pub fn index_stats(&self) -> IndexStats {
        self.read_snapshot().stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Resolve `Agentic` through the selector; explicit modes pass through.
    fn resolve_mode(&self, query: &str, mode: SearchMode) -> StrategyDecision {
        if mode != SearchMode::Agentic {
            return StrategyDecision {
                method: mode,
                reasoning: format!("mode '{}' requested explicitly", mode.as_str()),
                confidence: 1.0,
            };
        }
        let concept = self.graph.is_applicable(query);
        self.selector
            .select(query, concept.as_deref(), self.graph.is_available())
    }

    /// Embed the published corpus into the vector store. Fire-and-forget:
    /// a document that fails to embed stays keyword-only.
    fn upsert_embeddings(&self, snapshot: &IndexSnapshot) {
        let Some(embedder) = self.embedder.get() else {
            return;
        };
        let Some(store) = self.vector_store.get() else {
            return;
        };

        let mut entries = Vec::with_capacity(snapshot.len());
        for doc in snapshot.documents() {
            match embedder.embed(&doc.content) {
                Ok(vector) => entries.push((doc.id.clone(), vector)),
                Err(e) => {
                    warn!(id = %doc.id, error = %e, "embedding failed, document is keyword-only")
                }
            }
        }
        if let Err(e) = store.upsert(&entries) {
            warn!(error = %e, "vector store upsert failed");
        }
    }

    fn bump_mode(&self, mode: SearchMode) {
        let mut counts = self.mode_counts.lock().unwrap_or_else(|e| e.into_inner());
        *counts.entry(mode.as_str().to_string()).or_default() += 1;
    }

    fn read_snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.snapshot.read().unwrap_or_else(|e| e.into_inner()))
    }

    fn write_slot(&self) -> std::sync::RwLockWriteGuard<'_, Arc<IndexSnapshot>> {
        self.snapshot.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
