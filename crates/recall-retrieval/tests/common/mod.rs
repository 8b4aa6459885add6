//! Shared in-memory port implementations for integration tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{Arc, Mutex};

use recall_core::config::RecallConfig;
use recall_core::models::{ContentItem, GraphNeighbor, RelationKind};
use recall_core::traits::{
    ICrossEncoder, IEmbeddingProvider, IGraphStore, IVectorStore, Port,
};
use recall_core::{PortError, PortResult};
use recall_retrieval::RetrievalEngine;

pub const DIMS: usize = 8;

/// Deterministic bag-of-words embedder: each token bumps one dimension.
pub struct HashEmbedder;

impl IEmbeddingProvider for HashEmbedder {
    fn embed(&self, text: &str) -> PortResult<Vec<f32>> {
        let mut v = vec![0.0f32; DIMS];
        for token in text.split(|c: char| !c.is_alphanumeric()) {
            if token.is_empty() {
                continue;
            }
            let mut h: usize = 0;
            for b in token.to_lowercase().bytes() {
                h = h.wrapping_mul(31).wrapping_add(b as usize);
            }
            v[h % DIMS] += 1.0;
        }
        Ok(v)
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn name(&self) -> &str {
        "hash-embedder"
    }
}

/// Vector store over a plain map, ranked by cosine similarity.
#[derive(Default)]
pub struct MemoryVectorStore {
    entries: Mutex<HashMap<String, Vec<f32>>>,
}

impl IVectorStore for MemoryVectorStore {
    fn upsert(&self, entries: &[(String, Vec<f32>)]) -> PortResult<()> {
        let mut map = self.entries.lock().unwrap();
        for (id, vector) in entries {
            map.insert(id.clone(), vector.clone());
        }
        Ok(())
    }

    fn nearest(&self, vector: &[f32], k: usize) -> PortResult<Vec<(String, f64)>> {
        let map = self.entries.lock().unwrap();
        let mut scored: Vec<(String, f64)> = map
            .iter()
            .map(|(id, v)| (id.clone(), cosine(vector, v)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(k);
        Ok(scored)
    }
}

fn cosine(a: &[f32], b: &[f32]) -> f64 {
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let nb: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        (dot / (na * nb)) as f64
    }
}

/// Concept graph for the study corpus below.
pub struct StudyGraph;

impl IGraphStore for StudyGraph {
    fn known_concepts(&self) -> PortResult<Vec<String>> {
        Ok(vec![
            "binary search trees".to_string(),
            "trees".to_string(),
            "hash tables".to_string(),
            "graphs".to_string(),
        ])
    }

    fn neighbors(
        &self,
        concept: &str,
        _relations: &[RelationKind],
    ) -> PortResult<Vec<GraphNeighbor>> {
        let edges: Vec<GraphNeighbor> = match concept {
            "binary search trees" => vec![GraphNeighbor {
                concept: "trees".to_string(),
                relation: RelationKind::PartOf,
            }],
            "trees" => vec![GraphNeighbor {
                concept: "graphs".to_string(),
                relation: RelationKind::RelatedTo,
            }],
            _ => Vec::new(),
        };
        Ok(edges)
    }
}

/// Scores passages by length; deterministic and order-free.
pub struct LengthEncoder;

impl ICrossEncoder for LengthEncoder {
    fn score(&self, _query: &str, passage: &str) -> PortResult<f64> {
        Ok(passage.len() as f64)
    }
}

/// Signals test code on entry to `embed`, then blocks until released.
/// Lets a test hold an `index_content` call open mid-flight.
pub struct GatedEmbedder {
    pub entered: Sender<()>,
    pub release: Mutex<Receiver<()>>,
}

impl IEmbeddingProvider for GatedEmbedder {
    fn embed(&self, _text: &str) -> PortResult<Vec<f32>> {
        let _ = self.entered.send(());
        self.release
            .lock()
            .unwrap()
            .recv()
            .map_err(|_| PortError::Backend {
                port: "embedder".into(),
                message: "release channel closed".into(),
            })?;
        Ok(vec![0.0; DIMS])
    }

    fn dimensions(&self) -> usize {
        DIMS
    }

    fn name(&self) -> &str {
        "gated-embedder"
    }
}

pub fn note(id: &str, title: &str, text: &str, concept: &str) -> ContentItem {
    let mut fields = BTreeMap::new();
    fields.insert("title".to_string(), title.to_string());
    fields.insert("text".to_string(), text.to_string());
    let mut metadata = BTreeMap::new();
    metadata.insert("concept".to_string(), concept.to_string());
    ContentItem {
        id: id.to_string(),
        fields,
        metadata,
    }
}

/// Four study notes, one per concept in [`StudyGraph`].
pub fn corpus() -> Vec<ContentItem> {
    vec![
        note(
            "n1",
            "Binary Search Trees",
            "binary search trees keep keys ordered for fast lookup",
            "binary search trees",
        ),
        note(
            "n2",
            "Tree Traversals",
            "inorder preorder and postorder traversal of trees",
            "trees",
        ),
        note(
            "n3",
            "Hash Tables",
            "hash tables map keys to buckets with a hash function",
            "hash tables",
        ),
        note(
            "n4",
            "Graphs",
            "graphs model relationships with nodes and edges",
            "graphs",
        ),
    ]
}

/// Engine with every port wired to an in-memory implementation.
pub fn full_engine(config: RecallConfig) -> RetrievalEngine {
    RetrievalEngine::new(
        config,
        Port::available(Arc::new(HashEmbedder)),
        Port::available(Arc::new(MemoryVectorStore::default())),
        Port::available(Arc::new(StudyGraph)),
        Port::available(Arc::new(LengthEncoder)),
    )
}

/// Engine with no external ports at all; keyword retrieval only.
pub fn bare_engine(config: RecallConfig) -> RetrievalEngine {
    RetrievalEngine::new(
        config,
        Port::Unavailable,
        Port::Unavailable,
        Port::Unavailable,
        Port::Unavailable,
    )
}
