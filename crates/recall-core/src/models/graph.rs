use serde::{Deserialize, Serialize};

/// Edge labels in the knowledge graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    PrerequisiteOf,
    RelatedTo,
    PartOf,
}

impl RelationKind {
    /// Every relation kind, in the order expansion considers them.
    pub const ALL: [RelationKind; 3] = [
        RelationKind::PrerequisiteOf,
        RelationKind::RelatedTo,
        RelationKind::PartOf,
    ];
}

/// A depth-1 neighbor returned by the graph port. Depth accounting during
/// expansion is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNeighbor {
    pub concept: String,
    pub relation: RelationKind,
}
