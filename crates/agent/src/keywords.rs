//! Keyword Index
//!
//! Topic words drawn from the call purpose and the talking points. Used only
//! as a coarse relevance signal: an utterance is "on topic" when any keyword
//! appears as a substring of it. No stemming, no fuzzy matching.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use call_agent_core::CallContext;

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z]{4,}").unwrap());

/// Deduplicated lowercase keyword set
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordIndex {
    terms: BTreeSet<String>,
}

impl KeywordIndex {
    /// Build the index from a call context
    pub fn build(context: &CallContext) -> Self {
        let mut corpus = context.purpose.clone();
        for point in &context.talking_points {
            corpus.push(' ');
            corpus.push_str(point);
        }
        Self::from_text(&corpus)
    }

    /// Build the index from arbitrary text
    pub fn from_text(text: &str) -> Self {
        let terms = WORD_PATTERN
            .find_iter(text)
            .map(|m| m.as_str().to_ascii_lowercase())
            .collect();
        Self { terms }
    }

    /// True when any keyword occurs inside the (already lowercased) text
    pub fn matches(&self, lowered: &str) -> bool {
        self.terms.iter().any(|term| lowered.contains(term.as_str()))
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}
