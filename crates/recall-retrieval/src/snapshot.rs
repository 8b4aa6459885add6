//! Immutable index snapshot published by the engine.

use std::collections::HashMap;

use recall_core::models::{Document, IndexStats};
use recall_core::IndexError;

use crate::bm25::Bm25Index;

/// Everything a query needs, frozen at publish time.
///
/// The engine holds `RwLock<Arc<IndexSnapshot>>`; readers clone the `Arc`
/// and drop the lock before any port I/O, so an in-flight query always
/// runs against exactly one published corpus and never a half-built one.
#[derive(Debug, Default)]
pub struct IndexSnapshot {
    bm25: Bm25Index,
    documents: Vec<Document>,
    by_id: HashMap<String, usize>,
    /// Lowercased `concept` metadata → document positions.
    by_concept: HashMap<String, Vec<usize>>,
}

impl IndexSnapshot {
    /// The empty snapshot used before the first `index_content`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a snapshot off to the side. Duplicate ids fail the build and
    /// leave whatever snapshot is currently published untouched.
    pub fn build(documents: Vec<Document>) -> Result<Self, IndexError> {
        let bm25 = Bm25Index::build(&documents)?;

        let mut by_id = HashMap::with_capacity(documents.len());
        let mut by_concept: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, doc) in documents.iter().enumerate() {
            by_id.insert(doc.id.clone(), pos);
            if let Some(concept) = doc.metadata.get("concept") {
                by_concept
                    .entry(concept.to_lowercase())
                    .or_default()
                    .push(pos);
            }
        }

        Ok(Self {
            bm25,
            documents,
            by_id,
            by_concept,
        })
    }

    pub fn bm25(&self) -> &Bm25Index {
        &self.bm25
    }

    pub fn stats(&self) -> IndexStats {
        self.bm25.stats()
    }

    pub fn document(&self, pos: usize) -> &Document {
        &self.documents[pos]
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Positions of documents tagged with `concept` (case-insensitive).
    pub fn documents_for_concept(&self, concept: &str) -> &[usize] {
        self.by_concept
            .get(&concept.to_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
