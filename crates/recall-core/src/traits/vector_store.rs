use crate::errors::PortResult;

/// Vector store over document embeddings (external ANN index).
pub trait IVectorStore: Send + Sync {
    /// Insert or replace embeddings keyed by document id.
    fn upsert(&self, entries: &[(String, Vec<f32>)]) -> PortResult<()>;

    /// Ids and similarities of the `k` stored vectors nearest to `vector`,
    /// most similar first.
    fn nearest(&self, vector: &[f32], k: usize) -> PortResult<Vec<(String, f64)>>;
}
