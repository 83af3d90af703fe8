//! Utterance Classification
//!
//! One decision per caller utterance, first match wins:
//!
//! 1. explicit request to reach the principal
//! 2. a question that touches none of the call's keywords
//! 3. anything else continues the script
//!
//! Matching is plain substring / bag-of-words over the lowercased text.
//! Negated requests ("I don't want to talk to Manohar") still count as
//! escalation requests.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::escalation::EscalationReason;
use crate::keywords::KeywordIndex;

static INTERROGATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(what|why|how|who|when|where|which|explain|clarify)\b").unwrap()
});

/// Verbs that, combined with the principal's name, ask for a handoff
const ACTION_VERBS: [&str; 3] = ["speak", "talk", "connect"];

/// Phrase prefixes that, followed by the principal's name, ask for a handoff
const REQUEST_PHRASES: [&str; 7] = [
    "speak with",
    "speak to",
    "talk to",
    "talk with",
    "connect me with",
    "connect me to",
    "put me through to",
];

/// Routing decision for one utterance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// Hand the call to the principal
    Escalate { reason: EscalationReason },
    /// Question outside the prepared context
    UnrecognizedQuestion,
    /// Carry on with the script
    Continue,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Escalate { .. } => "escalate",
            Decision::UnrecognizedQuestion => "unrecognized_question",
            Decision::Continue => "continue",
        }
    }
}

/// True when the text reads as a question
pub fn is_question(text: &str) -> bool {
    text.contains('?') || INTERROGATIVE.is_match(text)
}

/// Classifier bound to one principal
#[derive(Debug, Clone)]
pub struct UtteranceClassifier {
    principal: String,
    name_token: String,
    phrases: Vec<String>,
}

impl UtteranceClassifier {
    pub fn new(principal_name: &str) -> Self {
        let principal = principal_name.trim().to_lowercase();
        let name_token = principal
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_string();
        let phrases = REQUEST_PHRASES
            .iter()
            .map(|prefix| format!("{} {}", prefix, principal))
            .collect();

        Self {
            principal: principal_name.trim().to_string(),
            name_token,
            phrases,
        }
    }

    /// Principal name as configured (original casing)
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Explicit request to reach the principal
    pub fn is_escalation_request(&self, lowered: &str) -> bool {
        if self.name_token.is_empty() {
            return false;
        }
        if self.phrases.iter().any(|phrase| lowered.contains(phrase.as_str())) {
            return true;
        }
        lowered.contains(self.name_token.as_str())
            && ACTION_VERBS.iter().any(|verb| lowered.contains(verb))
    }

    /// Classify one caller utterance
    pub fn classify(&self, utterance: &str, keywords: &KeywordIndex) -> Decision {
        let lowered = utterance.to_lowercase();

        if self.is_escalation_request(&lowered) {
            return Decision::Escalate {
                reason: EscalationReason::CallerRequested {
                    principal: self.principal.clone(),
                },
            };
        }

        if is_question(&lowered) && !keywords.matches(&lowered) {
            return Decision::UnrecognizedQuestion;
        }

        Decision::Continue
    }
}
