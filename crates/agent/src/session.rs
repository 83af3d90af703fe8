//! Call session state
//!
//! One session exists at a time. It is either never started (both flags
//! false), active, or ended (after a normal close or a handoff).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use call_agent_core::ConversationTurn;

use crate::clarification::ClarificationBudget;
use crate::escalation::EscalationReason;
use crate::script::ScriptProgress;

/// Coarse lifecycle state derived from the flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CallStatus {
    Idle,
    Active,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSession {
    pub(crate) active: bool,
    pub(crate) ended: bool,
    pub(crate) clarifications: ClarificationBudget,
    pub(crate) script: ScriptProgress,
    pub(crate) launched_at: Option<DateTime<Utc>>,
    pub(crate) handoff_reason: Option<EscalationReason>,
}

impl CallSession {
    /// Baseline before any call was started
    pub fn never_started(talking_points: usize) -> Self {
        Self {
            active: false,
            ended: false,
            clarifications: ClarificationBudget::default(),
            script: ScriptProgress::new(talking_points),
            launched_at: None,
            handoff_reason: None,
        }
    }

    pub(crate) fn start(talking_points: usize, launched_at: DateTime<Utc>) -> Self {
        Self {
            active: true,
            launched_at: Some(launched_at),
            ..Self::never_started(talking_points)
        }
    }

    pub(crate) fn finish(&mut self) {
        self.active = false;
        self.ended = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn status(&self) -> CallStatus {
        match (self.active, self.ended) {
            (true, _) => CallStatus::Active,
            (false, true) => CallStatus::Ended,
            (false, false) => CallStatus::Idle,
        }
    }

    pub fn clarifications_used(&self) -> u32 {
        self.clarifications.used()
    }

    pub fn next_point_index(&self) -> usize {
        self.script.next_point_index()
    }

    pub fn covered_points(&self) -> &[bool] {
        self.script.covered_points()
    }

    pub fn launched_at(&self) -> Option<DateTime<Utc>> {
        self.launched_at
    }

    pub fn handoff_reason(&self) -> Option<&EscalationReason> {
        self.handoff_reason.as_ref()
    }
}

/// Read-only view of the session for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: CallStatus,
    pub active: bool,
    pub ended: bool,
    pub clarifications_used: u32,
    pub next_point_index: usize,
    pub covered_points: Vec<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launched_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handoff_reason: Option<String>,
    pub turns: Vec<ConversationTurn>,
}

impl SessionSnapshot {
    pub(crate) fn capture(
        session: &CallSession,
        turns: &[ConversationTurn],
        now: DateTime<Utc>,
    ) -> Self {
        // Display timer only runs while the call is live
        let elapsed_seconds = match (session.active, session.launched_at) {
            (true, Some(start)) => Some((now - start).num_seconds().max(0)),
            _ => None,
        };

        Self {
            status: session.status(),
            active: session.active,
            ended: session.ended,
            clarifications_used: session.clarifications_used(),
            next_point_index: session.next_point_index(),
            covered_points: session.covered_points().to_vec(),
            launched_at: session.launched_at,
            elapsed_seconds,
            handoff_reason: session.handoff_reason.as_ref().map(EscalationReason::describe),
            turns: turns.to_vec(),
        }
    }
}
