//! First-stage candidate retrieval: keyword, semantic, and fused hybrid.

pub mod fusion;
mod hybrid;

pub use hybrid::HybridSearcher;
