//! Error types for search request validation and pipeline execution.

use thiserror::Error;

/// Errors produced while building or running a search pipeline.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request resolved to zero usable clauses and no pipeline can be
    /// built. Callers translate this to a client-facing bad-request response
    /// and must not attempt execution.
    #[error("invalid search request: {0}")]
    Validation(String),

    /// The document-store collaborator failed while running a pipeline.
    /// The underlying failure is carried verbatim, never masked.
    #[error("pipeline execution failed: {0}")]
    Execution(anyhow::Error),
}

impl SearchError {
    /// Create a validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        SearchError::Validation(msg.into())
    }

    /// Wrap a collaborator failure.
    pub fn execution(err: impl Into<anyhow::Error>) -> Self {
        SearchError::Execution(err.into())
    }
}

/// Result type alias for amphora operations.
pub type Result<T> = std::result::Result<T, SearchError>;
