//! # Amphora
//!
//! A typed query-construction layer for document-store full-text search.
//!
//! Amphora turns free-text "include/exclude keyword or phrase" inputs into a
//! declarative aggregation pipeline for an external document store:
//!
//! - Comma-separated raw strings are split into typed search terms
//!   (bare keywords vs. double-quoted phrases).
//! - A pipeline builder assembles the terms into an ordered sequence of
//!   immutable stages: a compound should/must-not search stage, a relevance
//!   score annotation, an optional projection, and an optional result limit.
//! - An injected executor collaborator runs the pipeline; the core itself
//!   performs no I/O.
//!
//! ## Features
//!
//! - Pure, synchronous, allocation-fresh parsing and building
//! - Compile-time checked stage shapes with wire-exact serialization
//! - Fuzzy keyword matching and slop-tolerant phrase matching
//! - Hard exclusion filters independent of relevance scoring

// Core modules
mod error;
pub mod executor;
pub mod pipeline;
pub mod query;
pub mod service;

// Re-exports for the public API
pub use error::{Result, SearchError};
pub use executor::PipelineExecutor;
pub use pipeline::builder::{DEFAULT_FIELDS, DEFAULT_INDEX, PipelineBuilder};
pub use pipeline::stage::{
    CompoundBody, FuzzyOptions, PhraseClause, QueryStage, ScoreAnnotation, SearchClause,
    SearchStage, TextClause,
};
pub use query::parser::{ParsedTerms, parse};
pub use query::request::{SearchOptions, SearchRequest};
pub use query::term::SearchTerm;
pub use service::SearchService;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
