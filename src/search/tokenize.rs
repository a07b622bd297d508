//! Query tokenization: whitespace splitting and literal pattern compilation.

use regex::{Regex, RegexBuilder};

/// One whitespace-delimited unit of a query, compiled for case-insensitive
/// literal matching.
#[derive(Debug, Clone)]
pub struct Term {
    /// The term as typed by the user.
    raw: String,
    /// The term with pattern metacharacters escaped.
    escaped: String,
    matcher: TermMatcher,
}

#[derive(Debug, Clone)]
enum TermMatcher {
    Pattern(Regex),
    /// Used when the escaped pattern exceeds the regex size limit.
    Folded(String),
}

impl Term {
    fn new(raw: &str) -> Self {
        let escaped = regex::escape(raw);
        let matcher = match RegexBuilder::new(&escaped).case_insensitive(true).build() {
            Ok(regex) => TermMatcher::Pattern(regex),
            Err(e) => {
                tracing::warn!(
                    "Search term of {} bytes could not be compiled ({}), using folded substring match",
                    raw.len(),
                    e
                );
                TermMatcher::Folded(raw.to_lowercase())
            }
        };

        Self {
            raw: raw.to_string(),
            escaped,
            matcher,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    /// Case-insensitive substring test against a single field value.
    pub fn is_found_in(&self, haystack: &str) -> bool {
        match &self.matcher {
            TermMatcher::Pattern(regex) => regex.is_match(haystack),
            TermMatcher::Folded(needle) => haystack.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Splits a raw query on runs of whitespace and compiles each piece.
///
/// An empty or all-whitespace query yields no terms, which downstream means
/// "no filter".
pub fn tokenize(raw: &str) -> Vec<Term> {
    raw.split_whitespace().map(Term::new).collect()
}
