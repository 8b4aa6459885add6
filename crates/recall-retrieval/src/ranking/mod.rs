//! Second-stage precision refinement.

mod reranker;

pub use reranker::ReRanker;
