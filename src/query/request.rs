//! The per-request search model and the HTTP boundary contract.

use serde::Deserialize;

use crate::error::{Result, SearchError};
use crate::query::parser::{self, ParsedTerms};
use crate::query::term::SearchTerm;

/// A fully assembled search request.
///
/// Constructed per incoming request from raw strings, consumed immediately by
/// the pipeline builder, and discarded. Field, fuzziness, and slop overrides
/// fall back to the builder's construction-time configuration when unset.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    /// Terms a matching document should contain.
    pub include: Vec<SearchTerm>,
    /// Terms that unconditionally exclude a document.
    pub exclude: Vec<SearchTerm>,
    /// Per-request override of the fields to search.
    pub fields: Option<Vec<String>>,
    /// Per-request override of the keyword edit-distance tolerance.
    pub fuzziness: Option<u32>,
    /// Per-request override of the phrase word-gap tolerance.
    pub phrase_slop: Option<u32>,
    /// Maximum number of results, if bounded.
    pub limit: Option<u32>,
}

impl SearchRequest {
    /// Build a request from raw comma-separated include/exclude strings.
    pub fn from_raw(include: Option<&str>, exclude: Option<&str>) -> Self {
        let ParsedTerms { include, exclude } = parser::parse(include, exclude);
        SearchRequest {
            include,
            exclude,
            ..Default::default()
        }
    }

    /// Set the result limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Override the fields to search for this request only.
    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Override the keyword edit-distance tolerance for this request only.
    pub fn with_fuzziness(mut self, max_edits: u32) -> Self {
        self.fuzziness = Some(max_edits);
        self
    }

    /// Override the phrase word-gap tolerance for this request only.
    pub fn with_phrase_slop(mut self, slop: u32) -> Self {
        self.phrase_slop = Some(slop);
        self
    }
}

/// Query-string model supplied by the HTTP collaborator.
///
/// Mirrors the public API's query parameters: `includeInput` and
/// `excludeInput` carry the raw comma-separated term strings, and `limit`
/// arrives as an unparsed string (an empty string means unbounded).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Raw include string, e.g. `"Athena Statue", marble`.
    #[serde(rename = "includeInput")]
    pub include_input: Option<String>,
    /// Raw exclude string.
    #[serde(rename = "excludeInput")]
    pub exclude_input: Option<String>,
    /// Result limit as it arrives on the query string.
    pub limit: Option<String>,
}

impl SearchOptions {
    /// Parse the raw limit. Absent or empty means unbounded; anything else
    /// must be a non-negative integer.
    pub fn parse_limit(&self) -> Result<Option<u32>> {
        match self.limit.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<u32>().map(Some).map_err(|_| {
                SearchError::validation(format!("limit must be a positive integer, got {raw:?}"))
            }),
        }
    }

    /// Convert into a [`SearchRequest`], parsing the limit.
    pub fn to_request(&self) -> Result<SearchRequest> {
        let limit = self.parse_limit()?;
        let mut request =
            SearchRequest::from_raw(self.include_input.as_deref(), self.exclude_input.as_deref());
        request.limit = limit;
        Ok(request)
    }
}
