//! Typed aggregation pipeline construction.
//!
//! - `stage`: immutable, serde-serializable pipeline stage and clause shapes
//! - `builder`: assembles typed terms and configuration into a stage sequence

pub mod builder;
pub mod stage;

// Re-exports
pub use builder::{DEFAULT_FIELDS, DEFAULT_INDEX, PipelineBuilder};
pub use stage::{
    CompoundBody, FuzzyOptions, PhraseClause, QueryStage, ScoreAnnotation, SearchClause,
    SearchStage, TextClause,
};
