//! Call Assistant
//!
//! Owns the call context, the single call session and its transcript, and
//! exposes the boundary operations a transport drives: start, submit an
//! utterance, silence trigger, close, summary, reset and context edits.
//!
//! Every operation is synchronous and runs to completion. Calls made in the
//! wrong session state (submitting with no active call, closing twice) are
//! silent no-ops rather than errors.

use chrono::{DateTime, Utc};
use tokio::sync::broadcast;

use call_agent_config::ContextUpdate;
use call_agent_core::{CallContext, ConversationTurn, TurnStamper};

use crate::clarification::ClarificationOutcome;
use crate::classifier::{Decision, UtteranceClassifier};
use crate::escalation::{handoff_note, transfer_announcement, EscalationReason};
use crate::events::{CallEvent, EVENT_CHANNEL_CAPACITY};
use crate::keywords::KeywordIndex;
use crate::log::ConversationLog;
use crate::script::ScriptStep;
use crate::session::{CallSession, SessionSnapshot};
use crate::summary::{build_summary, SummaryInput};
use crate::AgentError;

/// Intro line spoken when a call starts
pub fn intro_line(principal: &str) -> String {
    format!(
        "Hello, this is the automated assistant calling on behalf of {}. Do you have a quick minute?",
        principal
    )
}

/// Courtesy line spoken on a normal close
pub fn closing_line(principal: &str) -> String {
    format!(
        "Thank you for your time today. {} will be in touch soon. Goodbye!",
        principal
    )
}

pub struct CallAssistant {
    context: CallContext,
    keywords: KeywordIndex,
    classifier: UtteranceClassifier,
    session: CallSession,
    log: ConversationLog,
    stamper: Box<dyn TurnStamper>,
    event_tx: broadcast::Sender<CallEvent>,
}

impl CallAssistant {
    /// Create an assistant for `context`, stamping turns with `stamper`
    pub fn new(context: CallContext, stamper: Box<dyn TurnStamper>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let keywords = KeywordIndex::build(&context);
        let classifier = UtteranceClassifier::new(&context.principal_name);
        let session = CallSession::never_started(context.talking_points.len());

        Self {
            context,
            keywords,
            classifier,
            session,
            log: ConversationLog::new(),
            stamper,
            event_tx,
        }
    }

    /// Create an assistant after validating the context
    pub fn try_new(context: CallContext, stamper: Box<dyn TurnStamper>) -> Result<Self, AgentError> {
        context.validate()?;
        Ok(Self::new(context, stamper))
    }

    /// Subscribe to call events
    pub fn subscribe(&self) -> broadcast::Receiver<CallEvent> {
        self.event_tx.subscribe()
    }

    pub fn context(&self) -> &CallContext {
        &self.context
    }

    pub fn keywords(&self) -> &KeywordIndex {
        &self.keywords
    }

    pub fn session(&self) -> &CallSession {
        &self.session
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Read-only view for renderers, timed against the wall clock
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshot_at(Utc::now())
    }

    /// Read-only view with elapsed time measured at `now`
    pub fn snapshot_at(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot::capture(&self.session, self.log.turns(), now)
    }

    // =========================================================================
    // Boundary operations
    // =========================================================================

    /// Begin a call. Returns the intro turn, or `None` if a call is already active.
    pub fn start_call(&mut self) -> Option<ConversationTurn> {
        if self.session.is_active() {
            tracing::debug!("start_call ignored: call already active");
            return None;
        }

        let stamp = self.stamper.next_stamp();
        self.session = CallSession::start(self.context.talking_points.len(), stamp.timestamp);
        self.log.clear();

        tracing::info!(
            talking_points = self.context.talking_points.len(),
            principal = %self.context.principal_name,
            "Call started"
        );
        let _ = self.event_tx.send(CallEvent::CallStarted {
            talking_points: self.context.talking_points.len(),
        });

        let intro = ConversationTurn::assistant(stamp, intro_line(&self.context.principal_name));
        Some(self.record(intro))
    }

    /// Process one caller utterance. Returns the turns it appended, caller turn first.
    pub fn submit_caller_utterance(&mut self, text: &str) -> Vec<ConversationTurn> {
        let text = text.trim();
        if !self.session.is_active() || text.is_empty() {
            return Vec::new();
        }

        let start = self.log.len();
        let stamp = self.stamper.next_stamp();
        let words = self.record(ConversationTurn::caller(stamp, text)).word_count();

        let decision = self.classifier.classify(text, &self.keywords);
        tracing::debug!(words, decision = decision.as_str(), "Classified caller utterance");

        match decision {
            Decision::Escalate { reason } => self.escalate(reason),
            Decision::UnrecognizedQuestion => self.handle_unclear_question(),
            Decision::Continue => self.deliver_next(),
        }

        self.log.since(start).to_vec()
    }

    /// Hand off because the caller went quiet. Silence detection is external.
    pub fn trigger_silence_escalation(&mut self) {
        if self.session.is_active() {
            self.escalate(EscalationReason::CallerSilent);
        }
    }

    /// Close the call normally
    pub fn close_call(&mut self) {
        if !self.session.is_active() {
            return;
        }

        let stamp = self.stamper.next_stamp();
        let line = closing_line(&self.context.principal_name);
        self.record(ConversationTurn::assistant(stamp, line));
        self.session.finish();

        tracing::info!(
            covered = self.session.covered_points().iter().filter(|c| **c).count(),
            total = self.context.talking_points.len(),
            "Call closed"
        );
        let _ = self.event_tx.send(CallEvent::CallClosed);
    }

    /// Post-call summary. Never mutates state.
    pub fn generate_summary(&self) -> String {
        build_summary(&SummaryInput {
            context: &self.context,
            log: &self.log,
            covered_points: self.session.covered_points(),
            ended: self.session.is_ended(),
        })
    }

    /// Discard the session unconditionally, keeping the context
    pub fn reset_session(&mut self) {
        self.session = CallSession::never_started(self.context.talking_points.len());
        self.log.clear();

        tracing::info!("Session reset");
        let _ = self.event_tx.send(CallEvent::SessionReset);
    }

    /// Apply an operator edit to the call context
    pub fn update_context(&mut self, update: ContextUpdate) -> Result<(), AgentError> {
        if update.is_empty() {
            return Ok(());
        }

        let next = update.apply_to(&self.context);
        next.validate()?;

        self.context = next;
        self.keywords = KeywordIndex::build(&self.context);
        self.classifier = UtteranceClassifier::new(&self.context.principal_name);
        if update.touches_talking_points() {
            self.session.script.resize(self.context.talking_points.len());
        }

        tracing::info!(
            talking_points = self.context.talking_points.len(),
            keywords = self.keywords.len(),
            "Call context updated"
        );
        let _ = self.event_tx.send(CallEvent::ContextUpdated);
        Ok(())
    }

    // =========================================================================
    // Decision handlers
    // =========================================================================

    fn deliver_next(&mut self) {
        let step = self.session.script.deliver_next(&self.context.talking_points);
        if let ScriptStep::Point { index, .. } = &step {
            tracing::debug!(index = *index, "Delivered talking point");
        }

        let stamp = self.stamper.next_stamp();
        self.record(ConversationTurn::assistant(stamp, step.line()));
    }

    fn handle_unclear_question(&mut self) {
        match self.session.clarifications.next_prompt() {
            ClarificationOutcome::Prompt(prompt) => {
                tracing::debug!(
                    used = self.session.clarifications_used(),
                    "Issued clarification prompt"
                );
                let stamp = self.stamper.next_stamp();
                self.record(ConversationTurn::assistant(stamp, prompt));
            },
            ClarificationOutcome::Exhausted => {
                self.escalate(EscalationReason::BeyondPreparedContext);
            },
        }
    }

    fn escalate(&mut self, reason: EscalationReason) {
        let note_stamp = self.stamper.next_stamp();
        self.record(ConversationTurn::system_note(note_stamp, handoff_note(&reason)));

        let stamp = self.stamper.next_stamp();
        let announcement = transfer_announcement(&self.context.principal_name);
        self.record(ConversationTurn::assistant(stamp, announcement));

        self.session.finish();
        self.session.handoff_reason = Some(reason.clone());

        tracing::info!(reason = %reason, kind = reason.as_str(), "Call escalated to principal");
        let _ = self.event_tx.send(CallEvent::Escalated { reason });
    }

    fn record(&mut self, turn: ConversationTurn) -> ConversationTurn {
        let _ = self.event_tx.send(CallEvent::TurnAppended(turn.clone()));
        self.log.append(turn).clone()
    }
}
