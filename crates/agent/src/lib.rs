//! Conversation-decision engine for scripted outbound calls
//!
//! Features:
//! - Keyword index over the call purpose and script
//! - Per-utterance classification (handoff request, off-script question, continue)
//! - Ordered talking-point delivery with coverage tracking
//! - Bounded clarification prompts
//! - Handoff to the principal with a recorded reason
//! - Consent-gated post-call summary
//! - Append-only conversation log and event fan-out for renderers

pub mod assistant;
pub mod clarification;
pub mod classifier;
pub mod escalation;
pub mod events;
pub mod keywords;
pub mod log;
pub mod script;
pub mod session;
pub mod summary;

pub use assistant::CallAssistant;
pub use clarification::{ClarificationBudget, ClarificationOutcome, CLARIFICATION_PROMPTS};
pub use classifier::{is_question, Decision, UtteranceClassifier};
pub use escalation::EscalationReason;
pub use events::CallEvent;
pub use keywords::KeywordIndex;
pub use log::ConversationLog;
pub use script::{ScriptProgress, ScriptStep, CLOSING_PROMPT, CONNECTIVES};
pub use session::{CallSession, CallStatus, SessionSnapshot};
pub use summary::build_summary;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid call context: {0}")]
    Context(#[from] call_agent_core::Error),
}
