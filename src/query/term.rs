//! Typed search terms and token classification.

/// A single search term extracted from raw user input.
///
/// Keywords are matched with fuzzy single- or multi-word text comparison;
/// phrases are matched as an exact ordered word sequence with optional slop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchTerm {
    /// An unquoted token.
    Keyword(String),
    /// A double-quoted token, quotes stripped.
    Phrase(String),
}

impl SearchTerm {
    /// Classify a raw token from a comma-separated input string.
    ///
    /// The token is trimmed of surrounding whitespace first. A trimmed token
    /// wrapped in exactly one pair of double quotes becomes a
    /// [`SearchTerm::Phrase`] with the quotes stripped and the inner content
    /// untouched. Anything else, including malformed quoting (one quote, more
    /// than two, or two quotes that do not enclose the token), falls through
    /// to [`SearchTerm::Keyword`] with its quote characters intact.
    pub fn classify(token: &str) -> Self {
        let trimmed = token.trim();
        if is_quoted(trimmed) {
            SearchTerm::Phrase(trimmed[1..trimmed.len() - 1].to_string())
        } else {
            SearchTerm::Keyword(trimmed.to_string())
        }
    }

    /// The term text.
    pub fn text(&self) -> &str {
        match self {
            SearchTerm::Keyword(text) | SearchTerm::Phrase(text) => text,
        }
    }

    /// Whether the term carries no text.
    ///
    /// Empty terms come from empty tokens in the raw input (`"a,,b"`) and
    /// contribute no clause when a pipeline is built.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

fn is_quoted(token: &str) -> bool {
    token.len() >= 2
        && token.starts_with('"')
        && token.ends_with('"')
        && token.matches('"').count() == 2
}
