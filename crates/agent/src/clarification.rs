//! Clarification budget
//!
//! A caller gets at most two clarification prompts per call. The next
//! unanswerable question hands the call off instead.

use serde::{Deserialize, Serialize};

/// Prompts issued in order, one per unanswerable question
pub const CLARIFICATION_PROMPTS: [&str; 2] = [
    "I'm sorry, I don't have details on that. Could you rephrase, or tell me what matters most to you right now?",
    "I want to make sure I get this right. Could you say a bit more about what you're looking for?",
];

/// Maximum prompts per call
pub const MAX_CLARIFICATIONS: u32 = CLARIFICATION_PROMPTS.len() as u32;

/// What to do with an unanswerable question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClarificationOutcome {
    /// Ask the caller to clarify with this prompt
    Prompt(&'static str),
    /// Budget spent; escalate
    Exhausted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarificationBudget {
    used: u32,
}

impl ClarificationBudget {
    pub fn used(&self) -> u32 {
        self.used
    }

    pub fn remaining(&self) -> u32 {
        MAX_CLARIFICATIONS.saturating_sub(self.used)
    }

    /// Spend one prompt if any remain
    pub fn next_prompt(&mut self) -> ClarificationOutcome {
        match CLARIFICATION_PROMPTS.get(self.used as usize) {
            Some(prompt) => {
                self.used += 1;
                ClarificationOutcome::Prompt(prompt)
            },
            None => ClarificationOutcome::Exhausted,
        }
    }
}
