//! Okapi BM25 inverted index.
//!
//! Classic BM25 with the standard constants k1 = 1.5 and b = 0.75
//! (`recall_core::constants`, fixed by contract). The index is built whole
//! and never mutated; the engine publishes it inside an immutable snapshot.

use std::collections::{HashMap, HashSet};

use recall_core::constants::{BM25_B, BM25_K1};
use recall_core::models::{Document, IndexStats};
use recall_core::IndexError;

use crate::tokenizer::tokenize;

/// One posting: document position in indexing order plus term frequency.
#[derive(Debug, Clone, Copy)]
struct Posting {
    doc: usize,
    tf: u32,
}

/// Inverted index over the full corpus.
#[derive(Debug, Default)]
pub struct Bm25Index {
    /// term → postings, postings ordered by document position.
    postings: HashMap<String, Vec<Posting>>,
    /// Token count per document, in indexing order.
    doc_lengths: Vec<usize>,
    stats: IndexStats,
}

impl Bm25Index {
    /// Build a fresh index over `documents`.
    ///
    /// Fails only on duplicate document ids; callers are expected to
    /// deduplicate upstream.
    pub fn build(documents: &[Document]) -> Result<Self, IndexError> {
        let mut seen: HashSet<&str> = HashSet::with_capacity(documents.len());
        let mut postings: HashMap<String, Vec<Posting>> = HashMap::new();
        let mut doc_lengths = Vec::with_capacity(documents.len());
        let mut total_terms = 0usize;

        for (doc, document) in documents.iter().enumerate() {
            if !seen.insert(document.id.as_str()) {
                return Err(IndexError::DuplicateDocument {
                    id: document.id.clone(),
                });
            }

            let terms = tokenize(&document.content);
            total_terms += terms.len();
            doc_lengths.push(terms.len());

            let mut frequencies: HashMap<String, u32> = HashMap::new();
            for term in terms {
                *frequencies.entry(term).or_default() += 1;
            }
            for (term, tf) in frequencies {
                postings.entry(term).or_default().push(Posting { doc, tf });
            }
        }

        // Postings were filled per document, so each list may be out of
        // order across documents; sort once so tie-breaking stays stable.
        for list in postings.values_mut() {
            list.sort_by_key(|p| p.doc);
        }

        let document_count = documents.len();
        let average_document_length = if document_count == 0 {
            0.0
        } else {
            total_terms as f64 / document_count as f64
        };

        Ok(Self {
            postings,
            doc_lengths,
            stats: IndexStats {
                document_count,
                average_document_length,
            },
        })
    }

    pub fn stats(&self) -> IndexStats {
        self.stats
    }

    /// Number of documents containing `term`.
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(term).map_or(0, Vec::len)
    }

    /// Smoothed inverse document frequency:
    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`.
    fn idf(&self, term: &str) -> f64 {
        let n = self.stats.document_count as f64;
        let df = self.document_frequency(term) as f64;
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    /// Score the corpus against `query`.
    ///
    /// Returns up to `top_k` `(doc position, score)` pairs, descending by
    /// score, ties broken by indexing order. Query terms absent from the
    /// index contribute zero; an empty query or empty index yields `[]`.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<(usize, f64)> {
        if top_k == 0 || self.doc_lengths.is_empty() {
            return Vec::new();
        }
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }

        let avgdl = self.stats.average_document_length.max(f64::EPSILON);
        let mut scores: HashMap<usize, f64> = HashMap::new();

        for term in &terms {
            let Some(list) = self.postings.get(term) else {
                continue;
            };
            let idf = self.idf(term);
            for posting in list {
                let tf = posting.tf as f64;
                let len_norm = 1.0 - BM25_B + BM25_B * self.doc_lengths[posting.doc] as f64 / avgdl;
                let contribution = idf * (tf * (BM25_K1 + 1.0)) / (tf + BM25_K1 * len_norm);
                *scores.entry(posting.doc).or_default() += contribution;
            }
        }

        let mut ranked: Vec<(usize, f64)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        ranked.truncate(top_k);
        ranked
    }
}
