use crate::errors::PortResult;

/// Pairwise (query, passage) relevance model.
pub trait ICrossEncoder: Send + Sync {
    /// Relevance of `passage` to `query`. Higher is more relevant.
    fn score(&self, query: &str, passage: &str) -> PortResult<f64>;
}
