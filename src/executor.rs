//! Execution collaborator interface for built pipelines.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;
use crate::pipeline::stage::QueryStage;

/// Document-store collaborator that runs built pipelines.
///
/// Implementations wrap a real driver connection and are handed the stage
/// sequence verbatim. Store failures must surface as
/// [`SearchError::Execution`](crate::SearchError::Execution) without being
/// masked or retried here; any retry or timeout policy belongs to the
/// implementation, never to the pipeline builder.
///
/// A handle is created once at process start, injected into request-handling
/// code, and closed at shutdown.
#[async_trait]
pub trait PipelineExecutor: Send + Sync {
    /// Run an aggregation pipeline and return the raw result documents.
    async fn aggregate(&self, pipeline: &[QueryStage]) -> Result<Vec<Value>>;

    /// Release the underlying connection. Called once at process shutdown.
    async fn close(&self) -> Result<()>;
}
