mod document;
mod graph;
mod ranked_result;
mod response;
mod stats;

pub use document::{ContentItem, ContentType, Document};
pub use graph::{GraphNeighbor, RelationKind};
pub use ranked_result::{RankedResult, ResultSource};
pub use response::{RetrievalResponse, SearchMode, StrategyDecision};
pub use stats::{EngineAvailability, EngineStats, IndexStats};
