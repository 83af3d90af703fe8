//! Events published to observers (transcript renderers, transports)

use serde::Serialize;

use call_agent_core::ConversationTurn;

use crate::escalation::EscalationReason;

/// Call event
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallEvent {
    /// A new call began
    CallStarted { talking_points: usize },
    /// Turn appended to the log
    TurnAppended(ConversationTurn),
    /// Call handed off to the principal
    Escalated { reason: EscalationReason },
    /// Call closed normally
    CallClosed,
    /// Session returned to the never-started state
    SessionReset,
    /// Operator edited the call context
    ContextUpdated,
}

impl CallEvent {
    /// Wire name, matching the serialized `type` tag
    pub fn name(&self) -> &'static str {
        match self {
            CallEvent::CallStarted { .. } => "call_started",
            CallEvent::TurnAppended(_) => "turn_appended",
            CallEvent::Escalated { .. } => "escalated",
            CallEvent::CallClosed => "call_closed",
            CallEvent::SessionReset => "session_reset",
            CallEvent::ContextUpdated => "context_updated",
        }
    }
}

/// Capacity of the broadcast channel
pub const EVENT_CHANNEL_CAPACITY: usize = 100;
