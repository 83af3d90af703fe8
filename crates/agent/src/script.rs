//! Script Progression
//!
//! Tracks which talking point is next and which have been delivered. Points
//! go out once each, in configured order; after the last one the engine keeps
//! offering the same closing prompt.

use serde::{Deserialize, Serialize};

/// Connective prefixes, picked by `index % CONNECTIVES.len()`
pub const CONNECTIVES: [&str; 4] = ["To start, ", "Next, ", "Also, ", "One more thing: "];

/// Offered once every talking point has been delivered
pub const CLOSING_PROMPT: &str = "That covers everything I had prepared. Would you like to \
     schedule a follow-up call, or should I send the details over by email?";

/// Output of one progression step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    /// A talking point was delivered
    Point { index: usize, line: String },
    /// Nothing left to deliver
    Exhausted { line: &'static str },
}

impl ScriptStep {
    pub fn line(&self) -> &str {
        match self {
            ScriptStep::Point { line, .. } => line,
            ScriptStep::Exhausted { line } => line,
        }
    }
}

/// Cursor and coverage for the current call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptProgress {
    next_point_index: usize,
    covered_points: Vec<bool>,
}

impl ScriptProgress {
    /// Fresh progress for a script of `len` points
    pub fn new(len: usize) -> Self {
        Self {
            next_point_index: 0,
            covered_points: vec![false; len],
        }
    }

    pub fn next_point_index(&self) -> usize {
        self.next_point_index
    }

    pub fn covered_points(&self) -> &[bool] {
        &self.covered_points
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_point_index >= self.covered_points.len()
    }

    /// Deliver the next talking point, or the closing prompt when none remain
    pub fn deliver_next(&mut self, talking_points: &[String]) -> ScriptStep {
        let index = self.next_point_index;
        match talking_points.get(index) {
            Some(point) if index < self.covered_points.len() => {
                let connective = CONNECTIVES[index % CONNECTIVES.len()];
                let line = format!("{}{}", connective, terminate_sentence(point));
                self.covered_points[index] = true;
                self.next_point_index += 1;
                ScriptStep::Point { index, line }
            },
            _ => ScriptStep::Exhausted {
                line: CLOSING_PROMPT,
            },
        }
    }

    /// Re-align with an edited script of `len` points.
    ///
    /// Surviving indices keep their coverage, new indices start uncovered,
    /// and the cursor is clamped to the new length.
    pub fn resize(&mut self, len: usize) {
        self.covered_points.resize(len, false);
        self.next_point_index = self.next_point_index.min(len);
    }
}

/// Trim and add a period unless the text already ends a sentence
pub fn terminate_sentence(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.ends_with(['.', '!', '?']) {
        trimmed.to_string()
    } else {
        format!("{}.", trimmed)
    }
}
