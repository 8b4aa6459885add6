use crate::errors::PortResult;
use crate::models::{GraphNeighbor, RelationKind};

/// Knowledge-graph store holding concept nodes and typed edges.
///
/// The port answers depth-1 queries only; breadth-first walking with depth
/// accounting belongs to the expander on this side of the boundary.
pub trait IGraphStore: Send + Sync {
    /// Every concept name known to the graph.
    fn known_concepts(&self) -> PortResult<Vec<String>>;

    /// Direct neighbors of `concept` along the given relation kinds.
    fn neighbors(&self, concept: &str, relations: &[RelationKind])
        -> PortResult<Vec<GraphNeighbor>>;
}
