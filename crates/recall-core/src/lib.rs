//! # recall-core
//!
//! Foundation crate for the recall retrieval engine.
//! Defines models, port traits, errors, config, and constants.
//! The retrieval crate builds on top of this; no pipeline logic lives here.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::RecallConfig;
pub use errors::{IndexError, PortError, PortResult, RecallError, RecallResult};
pub use models::{
    ContentItem, ContentType, Document, RankedResult, ResultSource, RetrievalResponse, SearchMode,
    StrategyDecision,
};
pub use traits::Port;
