//! Post-call summary
//!
//! Builds a plain-text digest from the transcript and script coverage.
//! Consent is checked before anything else, and the transcript is never read
//! when consent is missing.

use once_cell::sync::Lazy;
use regex::Regex;

use call_agent_core::{CallContext, Sender};

use crate::log::ConversationLog;

pub const SUMMARY_WITHHELD: &str =
    "Summary withheld: the caller did not consent to a post-call summary.";
pub const SUMMARY_NOT_READY: &str = "End the call first to generate a summary.";
pub const NO_POINTS_COVERED: &str = "None were marked as complete.";
pub const NO_CALLER_NOTES: &str = "Nothing specific captured.";
pub const FALLBACK_NEXT_STEP: &str = "Follow up with the caller to confirm next steps.";

/// Number of caller turns quoted in the summary
pub const CALLER_NOTES_LIMIT: usize = 3;

static NEXT_STEP_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)schedule|coordinate|follow up|send").unwrap());

/// Inputs the summary is computed from
pub struct SummaryInput<'a> {
    pub context: &'a CallContext,
    pub log: &'a ConversationLog,
    pub covered_points: &'a [bool],
    pub ended: bool,
}

/// Render the summary text
pub fn build_summary(input: &SummaryInput<'_>) -> String {
    if !input.context.consent_to_summary {
        return SUMMARY_WITHHELD.to_string();
    }
    if !input.ended {
        return SUMMARY_NOT_READY.to_string();
    }

    let sections = [
        purpose_line(&input.context.purpose),
        covered_section(input.context, input.covered_points),
        caller_section(input.log),
        next_step_section(input.log),
    ];
    sections.join("\n\n")
}

/// At most one trailing period is folded into the sentence terminator
fn purpose_line(purpose: &str) -> String {
    let purpose = purpose.trim();
    format!("Purpose: {}.", purpose.strip_suffix('.').unwrap_or(purpose))
}

fn covered_section(context: &CallContext, covered: &[bool]) -> String {
    let bullets: Vec<String> = context
        .talking_points
        .iter()
        .zip(covered)
        .filter(|(_, done)| **done)
        .map(|(point, _)| format!("- {}", point.trim()))
        .collect();

    if bullets.is_empty() {
        format!("Covered talking points:\n{}", NO_POINTS_COVERED)
    } else {
        format!("Covered talking points:\n{}", bullets.join("\n"))
    }
}

fn caller_section(log: &ConversationLog) -> String {
    let bullets: Vec<String> = log
        .last_n_by_sender(Sender::Caller, CALLER_NOTES_LIMIT)
        .into_iter()
        .map(|turn| format!("- {}", turn.content))
        .collect();

    if bullets.is_empty() {
        format!("Caller responses worth noting:\n{}", NO_CALLER_NOTES)
    } else {
        format!("Caller responses worth noting:\n{}", bullets.join("\n"))
    }
}

fn next_step_section(log: &ConversationLog) -> String {
    let step = log
        .first_matching(Sender::Assistant, |turn| NEXT_STEP_PATTERN.is_match(&turn.content))
        .map(|turn| turn.content.as_str())
        .unwrap_or(FALLBACK_NEXT_STEP);
    format!("Recommended next step:\n{}", step)
}
