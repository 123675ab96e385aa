//! Assembles typed search terms into an ordered aggregation pipeline.

use crate::error::{Result, SearchError};
use crate::pipeline::stage::{
    CompoundBody, PhraseClause, QueryStage, ScoreAnnotation, SearchClause, SearchStage, TextClause,
};
use crate::query::request::SearchRequest;
use crate::query::term::SearchTerm;

/// Logical search-index identifier used when none is supplied.
pub const DEFAULT_INDEX: &str = "KeywordSearch";

/// Fields searched when neither the builder nor the request overrides them.
pub const DEFAULT_FIELDS: &[&str] = &["Title", "Description"];

/// Builds search pipelines from [`SearchRequest`]s.
///
/// Configuration (index name, field set, fuzziness, slop, optional
/// projection) is fixed at construction. Building is a pure function of the
/// request: no I/O, no shared state, a fresh stage sequence on every call, so
/// one builder can serve any number of concurrent request handlers.
#[derive(Debug, Clone)]
pub struct PipelineBuilder {
    index: String,
    fields: Vec<String>,
    fuzziness: u32,
    phrase_slop: u32,
    projection: Option<serde_json::Value>,
}

impl PipelineBuilder {
    /// Create a builder with the default index, fields, and zero tolerances.
    pub fn new() -> Self {
        PipelineBuilder {
            index: DEFAULT_INDEX.to_string(),
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            fuzziness: 0,
            phrase_slop: 0,
            projection: None,
        }
    }

    /// Set the logical search index to query.
    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// Set the default fields clauses match against.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Set the default keyword edit-distance tolerance (0 = exact).
    pub fn fuzziness(mut self, max_edits: u32) -> Self {
        self.fuzziness = max_edits;
        self
    }

    /// Set the default phrase word-gap tolerance (0 = exact sequence).
    pub fn phrase_slop(mut self, slop: u32) -> Self {
        self.phrase_slop = slop;
        self
    }

    /// Attach a projection stage to every built pipeline.
    pub fn projection(mut self, projection: serde_json::Value) -> Self {
        self.projection = Some(projection);
        self
    }

    /// Build the ordered stage sequence for `request`.
    ///
    /// Include terms become `should` clauses, exclude terms become `mustNot`
    /// clauses, and empty-text terms are skipped on both sides. Stage order
    /// is fixed: the search stage, the score annotation, then the optional
    /// projection and limit stages. No sort stage is emitted; result order is
    /// left to the execution collaborator.
    ///
    /// Fails with [`SearchError::Validation`] when the request resolves to
    /// zero usable clauses.
    pub fn build(&self, request: &SearchRequest) -> Result<Vec<QueryStage>> {
        let fields = request
            .fields
            .as_deref()
            .unwrap_or(&self.fields);
        let fuzziness = request.fuzziness.unwrap_or(self.fuzziness);
        let slop = request.phrase_slop.unwrap_or(self.phrase_slop);

        let mut compound = CompoundBody {
            should: clauses(&request.include, fields, fuzziness, slop),
            minimum_should_match: None,
            must_not: clauses(&request.exclude, fields, fuzziness, slop),
        };

        if compound.is_empty() {
            return Err(SearchError::validation(
                "no include or exclude clauses provided; supply at least one non-empty term",
            ));
        }

        if !compound.should.is_empty() {
            compound.minimum_should_match = Some(1);
        }

        let mut pipeline = vec![
            QueryStage::Search(SearchStage {
                index: self.index.clone(),
                compound,
            }),
            QueryStage::AddFields(ScoreAnnotation::search_score()),
        ];

        if let Some(projection) = &self.projection {
            pipeline.push(QueryStage::Project(projection.clone()));
        }

        if let Some(limit) = request.limit.filter(|&limit| limit > 0) {
            pipeline.push(QueryStage::Limit(limit));
        }

        Ok(pipeline)
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn clauses(
    terms: &[SearchTerm],
    fields: &[String],
    fuzziness: u32,
    slop: u32,
) -> Vec<SearchClause> {
    terms
        .iter()
        .filter(|term| !term.is_empty())
        .map(|term| match term {
            SearchTerm::Keyword(text) => {
                SearchClause::Text(TextClause::new(text.clone(), fields.to_vec(), fuzziness))
            }
            SearchTerm::Phrase(text) => {
                SearchClause::Phrase(PhraseClause::new(text.clone(), fields.to_vec(), slop))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(include: Option<&str>, exclude: Option<&str>) -> SearchRequest {
        SearchRequest::from_raw(include, exclude)
    }

    fn search_stage(pipeline: &[QueryStage]) -> &SearchStage {
        match &pipeline[0] {
            QueryStage::Search(stage) => stage,
            other => panic!("expected search stage first, got {other:?}"),
        }
    }

    #[test]
    fn test_single_keyword_builds_one_should_clause() {
        let pipeline = PipelineBuilder::new()
            .build(&request(Some("marble"), None))
            .unwrap();

        let stage = search_stage(&pipeline);
        assert_eq!(stage.index, DEFAULT_INDEX);
        assert_eq!(stage.compound.should.len(), 1);
        assert_eq!(stage.compound.minimum_should_match, Some(1));
        assert!(stage.compound.must_not.is_empty());
        match &stage.compound.should[0] {
            SearchClause::Text(text) => {
                assert_eq!(text.query, "marble");
                assert_eq!(text.path, DEFAULT_FIELDS);
                assert!(text.fuzzy.is_none());
            }
            other => panic!("expected text clause, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_request_is_rejected() {
        let err = PipelineBuilder::new()
            .build(&request(None, None))
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));
    }

    #[test]
    fn test_empty_tokens_contribute_no_clause() {
        // A single empty token parses to an empty keyword, which the builder
        // must filter; with nothing else left, the request is invalid.
        let err = PipelineBuilder::new()
            .build(&request(Some(""), None))
            .unwrap_err();
        assert!(matches!(err, SearchError::Validation(_)));

        let pipeline = PipelineBuilder::new()
            .build(&request(Some("marble,,clay"), None))
            .unwrap();
        assert_eq!(search_stage(&pipeline).compound.should.len(), 2);
    }

    #[test]
    fn test_exclude_terms_become_must_not() {
        let pipeline = PipelineBuilder::new()
            .build(&request(Some("marble"), Some("replica, \"modern forgery\"")))
            .unwrap();

        let compound = &search_stage(&pipeline).compound;
        assert_eq!(compound.should.len(), 1);
        assert_eq!(compound.minimum_should_match, Some(1));
        assert_eq!(compound.must_not.len(), 2);
        assert!(matches!(compound.must_not[0], SearchClause::Text(_)));
        assert!(matches!(compound.must_not[1], SearchClause::Phrase(_)));
    }

    #[test]
    fn test_exclude_only_request_has_no_minimum_should_match() {
        let pipeline = PipelineBuilder::new()
            .build(&request(None, Some("replica")))
            .unwrap();

        let compound = &search_stage(&pipeline).compound;
        assert!(compound.should.is_empty());
        assert_eq!(compound.minimum_should_match, None);
        assert_eq!(compound.must_not.len(), 1);
    }

    #[test]
    fn test_limit_appends_final_stage() {
        let builder = PipelineBuilder::new();
        let bounded = builder
            .build(&request(Some("marble"), None).with_limit(25))
            .unwrap();
        assert_eq!(bounded.len(), 3);
        assert_eq!(bounded.last(), Some(&QueryStage::Limit(25)));

        let unbounded = builder.build(&request(Some("marble"), None)).unwrap();
        assert_eq!(unbounded.len(), 2);
    }

    #[test]
    fn test_zero_limit_is_omitted() {
        let pipeline = PipelineBuilder::new()
            .build(&request(Some("marble"), None).with_limit(0))
            .unwrap();
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn test_fuzziness_zero_omits_fuzzy_parameter() {
        let pipeline = PipelineBuilder::new()
            .build(&request(Some("marble"), None))
            .unwrap();
        match &search_stage(&pipeline).compound.should[0] {
            SearchClause::Text(text) => assert!(text.fuzzy.is_none()),
            other => panic!("expected text clause, got {other:?}"),
        }
    }

    #[test]
    fn test_fuzziness_applies_to_keyword_clauses() {
        let pipeline = PipelineBuilder::new()
            .fuzziness(1)
            .build(&request(Some("marble"), None))
            .unwrap();
        match &search_stage(&pipeline).compound.should[0] {
            SearchClause::Text(text) => {
                assert_eq!(text.fuzzy.map(|fuzzy| fuzzy.max_edits), Some(1));
            }
            other => panic!("expected text clause, got {other:?}"),
        }
    }

    #[test]
    fn test_phrase_slop_applies_to_phrase_clauses() {
        let pipeline = PipelineBuilder::new()
            .phrase_slop(2)
            .build(&request(Some("\"Athena Statue\""), None))
            .unwrap();
        match &search_stage(&pipeline).compound.should[0] {
            SearchClause::Phrase(phrase) => assert_eq!(phrase.slop, Some(2)),
            other => panic!("expected phrase clause, got {other:?}"),
        }
    }

    #[test]
    fn test_request_overrides_builder_configuration() {
        let pipeline = PipelineBuilder::new()
            .fuzziness(1)
            .build(
                &request(Some("marble"), None)
                    .with_fields(["Name"])
                    .with_fuzziness(0),
            )
            .unwrap();
        match &search_stage(&pipeline).compound.should[0] {
            SearchClause::Text(text) => {
                assert_eq!(text.path, vec!["Name".to_string()]);
                assert!(text.fuzzy.is_none());
            }
            other => panic!("expected text clause, got {other:?}"),
        }
    }

    #[test]
    fn test_projection_stage_sits_between_score_and_limit() {
        let pipeline = PipelineBuilder::new()
            .projection(json!({"_id": 0, "Name": 1, "Title": 1}))
            .build(&request(Some("marble"), None).with_limit(5))
            .unwrap();

        assert_eq!(pipeline.len(), 4);
        assert!(matches!(pipeline[1], QueryStage::AddFields(_)));
        assert!(matches!(pipeline[2], QueryStage::Project(_)));
        assert_eq!(pipeline[3], QueryStage::Limit(5));
    }

    #[test]
    fn test_include_order_is_preserved_in_should_clauses() {
        let pipeline = PipelineBuilder::new()
            .build(&request(Some("bronze, \"grave goods\", coin"), None))
            .unwrap();

        let should = &search_stage(&pipeline).compound.should;
        assert_eq!(should.len(), 3);
        assert!(matches!(should[0], SearchClause::Text(_)));
        assert!(matches!(should[1], SearchClause::Phrase(_)));
        assert!(matches!(should[2], SearchClause::Text(_)));
    }

    #[test]
    fn test_built_pipeline_matches_wire_shape() {
        let pipeline = PipelineBuilder::new()
            .fuzziness(1)
            .build(&request(Some("marble"), Some("replica")).with_limit(25))
            .unwrap();

        assert_eq!(
            serde_json::to_value(&pipeline).unwrap(),
            json!([
                {
                    "$search": {
                        "index": "KeywordSearch",
                        "compound": {
                            "should": [
                                {
                                    "text": {
                                        "query": "marble",
                                        "path": ["Title", "Description"],
                                        "fuzzy": {"maxEdits": 1}
                                    }
                                }
                            ],
                            "minimumShouldMatch": 1,
                            "mustNot": [
                                {
                                    "text": {
                                        "query": "replica",
                                        "path": ["Title", "Description"],
                                        "fuzzy": {"maxEdits": 1}
                                    }
                                }
                            ]
                        }
                    }
                },
                {"$addFields": {"score": {"$meta": "searchScore"}}},
                {"$limit": 25}
            ])
        );
    }
}
