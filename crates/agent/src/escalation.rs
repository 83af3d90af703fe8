//! Handoff to the principal
//!
//! Escalation is terminal for the current call. The reason is written to the
//! transcript as a system note, followed by a fixed transfer announcement.

use serde::{Deserialize, Serialize};

/// Why the call was handed off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EscalationReason {
    /// Caller explicitly asked for the principal
    CallerRequested { principal: String },
    /// Clarification budget exhausted
    BeyondPreparedContext,
    /// External silence detector fired
    CallerSilent,
}

impl EscalationReason {
    /// Reason text recorded in the transcript
    pub fn describe(&self) -> String {
        match self {
            EscalationReason::CallerRequested { principal } => {
                format!("Caller requested {} directly.", principal)
            },
            EscalationReason::BeyondPreparedContext => {
                "Caller asked for information beyond prepared context.".to_string()
            },
            EscalationReason::CallerSilent => {
                "Caller remained silent for more than five seconds.".to_string()
            },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationReason::CallerRequested { .. } => "caller_requested",
            EscalationReason::BeyondPreparedContext => "beyond_prepared_context",
            EscalationReason::CallerSilent => "caller_silent",
        }
    }
}

impl std::fmt::Display for EscalationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

/// System note recorded when a handoff is triggered
pub fn handoff_note(reason: &EscalationReason) -> String {
    format!("Handoff triggered: {}", reason.describe())
}

/// Assistant line announcing the transfer
pub fn transfer_announcement(principal: &str) -> String {
    format!(
        "I'm going to bring {} onto the line now. Please hold for a moment while I transfer you.",
        principal
    )
}
