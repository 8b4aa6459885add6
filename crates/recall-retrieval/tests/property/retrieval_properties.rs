//! Property tests over the ranking primitives: tokenization, BM25
//! scoring, score fusion, and re-ranking.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::Arc;

use proptest::prelude::*;

use recall_core::models::{Document, RankedResult, ResultSource};
use recall_core::traits::{ICrossEncoder, Port};
use recall_core::PortResult;
use recall_retrieval::bm25::Bm25Index;
use recall_retrieval::ranking::ReRanker;
use recall_retrieval::search::fusion;
use recall_retrieval::tokenizer::tokenize;

fn word() -> impl Strategy<Value = String> {
    "[a-z]{1,8}"
}

fn text() -> impl Strategy<Value = String> {
    prop::collection::vec(word(), 1..12).prop_map(|words| words.join(" "))
}

/// Corpus with unique ids, one per map key.
fn corpus() -> impl Strategy<Value = Vec<Document>> {
    prop::collection::btree_map("[a-z0-9]{1,6}", text(), 1..8).prop_map(|docs| {
        docs.into_iter()
            .map(|(id, content)| Document {
                id,
                content,
                metadata: BTreeMap::new(),
            })
            .collect()
    })
}

fn scored_list() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::btree_map("[a-z0-9]{1,6}", 0.0f64..100.0, 0..10)
        .prop_map(|m| m.into_iter().collect())
}

fn candidates() -> impl Strategy<Value = Vec<RankedResult>> {
    prop::collection::btree_map("[a-z0-9]{1,6}", text(), 0..10).prop_map(|m| {
        m.into_iter()
            .map(|(id, content)| RankedResult {
                id,
                content,
                score: 0.5,
                source: ResultSource::Hybrid,
                rerank_score: None,
                metadata: BTreeMap::new(),
            })
            .collect()
    })
}

struct LengthEncoder;

impl ICrossEncoder for LengthEncoder {
    fn score(&self, _query: &str, passage: &str) -> PortResult<f64> {
        Ok(passage.len() as f64)
    }
}

proptest! {
    #[test]
    fn tokenize_yields_lowercase_alphanumeric_terms(input in "[ -~]{0,200}") {
        for term in tokenize(&input) {
            prop_assert!(!term.is_empty());
            prop_assert!(term.chars().all(|c| c.is_alphanumeric()));
            prop_assert_eq!(term.to_lowercase(), term);
        }
    }

    #[test]
    fn tokenize_is_case_insensitive(input in "[ -~]{0,200}") {
        prop_assert_eq!(tokenize(&input), tokenize(&input.to_uppercase()));
    }

    #[test]
    fn bm25_scores_are_positive_sorted_and_bounded(
        docs in corpus(),
        query in text(),
        top_k in 1usize..10,
    ) {
        let index = Bm25Index::build(&docs).unwrap();
        let hits = index.search(&query, top_k);

        prop_assert!(hits.len() <= top_k);
        let mut seen = HashSet::new();
        for window in hits.windows(2) {
            prop_assert!(window[0].1 >= window[1].1, "scores descend");
        }
        for (pos, score) in &hits {
            prop_assert!(*pos < docs.len());
            prop_assert!(*score > 0.0, "only matching documents are returned");
            prop_assert!(seen.insert(*pos), "no document appears twice");
        }
    }

    #[test]
    fn bm25_matches_exactly_the_docs_sharing_a_term(
        docs in corpus(),
        query in text(),
    ) {
        let index = Bm25Index::build(&docs).unwrap();
        let hits = index.search(&query, docs.len());

        let query_terms: HashSet<String> = tokenize(&query).into_iter().collect();
        let expected: BTreeSet<usize> = docs
            .iter()
            .enumerate()
            .filter(|(_, d)| tokenize(&d.content).iter().any(|t| query_terms.contains(t)))
            .map(|(pos, _)| pos)
            .collect();
        let actual: BTreeSet<usize> = hits.iter().map(|(pos, _)| *pos).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn normalization_maps_into_unit_interval(mut scores in scored_list()) {
        fusion::min_max_normalize(&mut scores);
        for (_, score) in &scores {
            prop_assert!((0.0..=1.0).contains(score));
        }
        if scores.len() > 1 {
            let max = scores.iter().map(|(_, s)| *s).fold(f64::MIN, f64::max);
            prop_assert!((max - 1.0).abs() < 1e-9, "best score normalizes to 1.0");
        }
    }

    #[test]
    fn fused_scores_stay_in_unit_interval_for_unit_weights(
        mut semantic in scored_list(),
        mut keyword in scored_list(),
        semantic_weight in 0.0f64..=1.0,
    ) {
        fusion::min_max_normalize(&mut semantic);
        fusion::min_max_normalize(&mut keyword);
        let fused = fusion::fuse(&semantic, &keyword, semantic_weight, 1.0 - semantic_weight);

        let input_ids: HashSet<&str> = semantic
            .iter()
            .chain(&keyword)
            .map(|(id, _)| id.as_str())
            .collect();
        prop_assert_eq!(fused.len(), input_ids.len(), "union of both legs, deduplicated");
        for window in fused.windows(2) {
            prop_assert!(window[0].1 >= window[1].1);
        }
        for (id, score) in &fused {
            prop_assert!(input_ids.contains(id.as_str()));
            prop_assert!((0.0..=1.0 + 1e-9).contains(score));
        }
    }

    #[test]
    fn rerank_is_idempotent_and_preserves_ids(
        shortlist in candidates(),
        top_k in 1usize..12,
    ) {
        let reranker = ReRanker::new(Port::available(Arc::new(LengthEncoder)), 50);

        let once = reranker.rerank("q", shortlist.clone(), top_k);
        prop_assert!(once.len() <= top_k);
        let input_ids: HashSet<&str> = shortlist.iter().map(|r| r.id.as_str()).collect();
        prop_assert!(once.iter().all(|r| input_ids.contains(r.id.as_str())));

        let twice = reranker.rerank("q", once.clone(), top_k);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn rerank_without_a_port_only_truncates(
        shortlist in candidates(),
        top_k in 1usize..12,
    ) {
        let reranker = ReRanker::new(Port::Unavailable, 50);
        let out = reranker.rerank("q", shortlist.clone(), top_k);
        let expected: Vec<&str> = shortlist.iter().take(top_k).map(|r| r.id.as_str()).collect();
        let actual: Vec<&str> = out.iter().map(|r| r.id.as_str()).collect();
        prop_assert_eq!(actual, expected);
    }
}
