//! Immutable, typed pipeline stage shapes.
//!
//! Every stage serializes to the exact wire shape the document store expects.
//! Field order within each object is fixed by declaration order, so the JSON
//! rendering of a built pipeline is reproducible byte for byte.

use serde::Serialize;

/// One ordered operation in a search pipeline.
///
/// Stages are immutable once built; a pipeline is a plain ordered
/// `Vec<QueryStage>`, not a tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum QueryStage {
    /// Full-text search stage carrying the compound clause body.
    #[serde(rename = "$search")]
    Search(SearchStage),
    /// Attaches the relevance score as an addressable `score` field.
    #[serde(rename = "$addFields")]
    AddFields(ScoreAnnotation),
    /// Caller-supplied projection of the result documents.
    #[serde(rename = "$project")]
    Project(serde_json::Value),
    /// Caps the number of returned documents.
    #[serde(rename = "$limit")]
    Limit(u32),
}

/// Body of the `$search` stage: a compound query against a named index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStage {
    /// Logical search-index identifier.
    pub index: String,
    /// The compound should/must-not clause body.
    pub compound: CompoundBody,
}

/// Compound clause body: scoring `should` clauses plus hard `mustNot`
/// filters.
///
/// The two groups are independent. When any should clause is present at
/// least one must match (`minimumShouldMatch` is set to 1); must-not clauses
/// exclude matching documents unconditionally, regardless of the should
/// outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompoundBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub should: Vec<SearchClause>,
    #[serde(rename = "minimumShouldMatch", skip_serializing_if = "Option::is_none")]
    pub minimum_should_match: Option<u32>,
    #[serde(rename = "mustNot", skip_serializing_if = "Vec::is_empty")]
    pub must_not: Vec<SearchClause>,
}

impl CompoundBody {
    /// Whether the body carries no clauses at all.
    pub fn is_empty(&self) -> bool {
        self.should.is_empty() && self.must_not.is_empty()
    }
}

/// A single clause inside a compound body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SearchClause {
    /// Fuzzy text match over one or more fields.
    #[serde(rename = "text")]
    Text(TextClause),
    /// Ordered phrase match over one or more fields.
    #[serde(rename = "phrase")]
    Phrase(PhraseClause),
}

/// `text` operator body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextClause {
    pub query: String,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<FuzzyOptions>,
}

impl TextClause {
    /// Create a text clause. A `max_edits` of 0 disables fuzzy matching and
    /// omits the `fuzzy` object from the wire shape entirely.
    pub fn new(query: impl Into<String>, path: Vec<String>, max_edits: u32) -> Self {
        TextClause {
            query: query.into(),
            path,
            fuzzy: (max_edits > 0).then_some(FuzzyOptions { max_edits }),
        }
    }
}

/// Edit-distance tolerance attached to a text clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FuzzyOptions {
    #[serde(rename = "maxEdits")]
    pub max_edits: u32,
}

/// `phrase` operator body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhraseClause {
    pub query: String,
    pub path: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slop: Option<u32>,
}

impl PhraseClause {
    /// Create a phrase clause. A `slop` of 0 requires an exact word sequence
    /// and omits the `slop` field from the wire shape entirely.
    pub fn new(query: impl Into<String>, path: Vec<String>, slop: u32) -> Self {
        PhraseClause {
            query: query.into(),
            path,
            slop: (slop > 0).then_some(slop),
        }
    }
}

/// `$addFields` body exposing the search relevance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreAnnotation {
    pub score: MetaExpression,
}

impl ScoreAnnotation {
    /// Annotation attaching the `$search` relevance score as `score`.
    pub fn search_score() -> Self {
        ScoreAnnotation {
            score: MetaExpression {
                meta: "searchScore",
            },
        }
    }
}

/// A `{"$meta": ...}` metadata expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetaExpression {
    #[serde(rename = "$meta")]
    pub meta: &'static str,
}
