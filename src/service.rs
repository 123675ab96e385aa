//! Facade wiring the parser, builder, and execution collaborator together.

use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::error::Result;
use crate::executor::PipelineExecutor;
use crate::pipeline::builder::PipelineBuilder;
use crate::query::request::SearchRequest;

/// Text-search entry point for request handlers.
///
/// The executor handle is injected at construction and closed explicitly at
/// shutdown. The service keeps no other state, so a single instance can be
/// shared across any number of request-handling tasks.
pub struct SearchService {
    builder: PipelineBuilder,
    executor: Arc<dyn PipelineExecutor>,
}

impl SearchService {
    /// Create a service around an injected executor.
    pub fn new(builder: PipelineBuilder, executor: Arc<dyn PipelineExecutor>) -> Self {
        SearchService { builder, executor }
    }

    /// Parse raw include/exclude inputs, build the pipeline, and run it.
    ///
    /// Returns [`SearchError::Validation`](crate::SearchError::Validation)
    /// without touching the store when the inputs yield no usable clauses;
    /// store failures propagate unchanged.
    pub async fn search(
        &self,
        include: Option<&str>,
        exclude: Option<&str>,
        limit: Option<u32>,
    ) -> Result<Vec<Value>> {
        let mut request = SearchRequest::from_raw(include, exclude);
        request.limit = limit;
        self.run(&request).await
    }

    /// Build and run the pipeline for an already-assembled request.
    pub async fn run(&self, request: &SearchRequest) -> Result<Vec<Value>> {
        let pipeline = self.builder.build(request)?;
        debug!(
            "running search pipeline: {}",
            serde_json::to_string(&pipeline).unwrap_or_default()
        );
        self.executor.aggregate(&pipeline).await
    }

    /// Close the underlying executor connection.
    pub async fn close(&self) -> Result<()> {
        self.executor.close().await
    }
}
