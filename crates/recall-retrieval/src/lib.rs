//! # recall-retrieval
//!
//! The retrieval core: BM25 keyword search, hybrid score fusion with an
//! external vector store, knowledge-graph expansion, cross-encoder
//! re-ranking, agentic strategy selection, and a TTL+LRU result cache,
//! all behind the [`RetrievalEngine`] façade.

pub mod bm25;
pub mod cache;
pub mod engine;
pub mod graph;
pub mod ranking;
pub mod search;
pub mod snapshot;
pub mod strategy;
pub mod tokenizer;

pub use engine::RetrievalEngine;
