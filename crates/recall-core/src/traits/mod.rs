mod cross_encoder;
mod embedding;
mod graph;
mod vector_store;

use std::sync::Arc;

pub use cross_encoder::ICrossEncoder;
pub use embedding::IEmbeddingProvider;
pub use graph::IGraphStore;
pub use vector_store::IVectorStore;

/// An external capability that may or may not be wired in.
///
/// Absence is a typed, checked condition: components match on this instead
/// of probing collaborators for optional methods or catching "not
/// configured" errors at call sites.
pub enum Port<T: ?Sized> {
    Available(Arc<T>),
    Unavailable,
}

impl<T: ?Sized> Port<T> {
    pub fn available(inner: Arc<T>) -> Self {
        Self::Available(inner)
    }

    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Available(inner) => Some(inner.as_ref()),
            Self::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

impl<T: ?Sized> Clone for Port<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Available(inner) => Self::Available(Arc::clone(inner)),
            Self::Unavailable => Self::Unavailable,
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for Port<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Available(_) => "Port::Available",
            Self::Unavailable => "Port::Unavailable",
        })
    }
}
