//! Cross-encoder re-ranking of the fused shortlist.
//!
//! Without a cross-encoder this is a passthrough: the first-stage ranking
//! is already serviceable, so absence degrades quality, not availability.

use std::sync::atomic::{AtomicBool, Ordering};

use recall_core::models::RankedResult;
use recall_core::traits::{ICrossEncoder, Port};
use tracing::warn;

pub struct ReRanker {
    port: Port<dyn ICrossEncoder>,
    /// Latency cap: at most this many candidates are scored per query.
    candidate_cap: usize,
    warned_unavailable: AtomicBool,
}

impl ReRanker {
    pub fn new(port: Port<dyn ICrossEncoder>, candidate_cap: usize) -> Self {
        Self {
            port,
            candidate_cap,
            warned_unavailable: AtomicBool::new(false),
        }
    }

    pub fn is_available(&self) -> bool {
        self.port.is_available()
    }

    /// Refine the top candidates with pairwise (query, passage) scores.
    ///
    /// Scores the top `min(len, cap)` candidates, records `rerank_score`,
    /// re-sorts that prefix descending (stable), and truncates to `top_k`.
    /// Idempotent under a deterministic scorer. If the port is absent the
    /// input order is preserved; a scoring error mid-batch degrades the
    /// whole call to that same passthrough rather than mixing scored and
    /// unscored candidates.
    pub fn rerank(
        &self,
        query: &str,
        mut results: Vec<RankedResult>,
        top_k: usize,
    ) -> Vec<RankedResult> {
        let Some(encoder) = self.port.get() else {
            if !self.warned_unavailable.swap(true, Ordering::Relaxed) {
                warn!("cross-encoder port not configured, returning candidates unrefined");
            }
            results.truncate(top_k);
            return results;
        };

        let cap = results.len().min(self.candidate_cap);
        let mut scores = Vec::with_capacity(cap);
        for candidate in results.iter().take(cap) {
            match encoder.score(query, &candidate.content) {
                Ok(score) => scores.push(score),
                Err(e) => {
                    warn!(error = %e, "cross-encoder failed, keeping first-stage order");
                    results.truncate(top_k);
                    return results;
                }
            }
        }

        for (candidate, score) in results.iter_mut().zip(&scores) {
            candidate.rerank_score = Some(*score);
        }
        results[..cap].sort_by(|a, b| {
            b.rerank_score
                .partial_cmp(&a.rerank_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(top_k);
        results
    }
}
