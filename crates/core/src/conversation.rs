//! Conversation types: senders, turns, and injected turn stamps

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// Scripted or templated line spoken by the assistant
    Assistant,
    /// Transcribed caller input
    Caller,
    /// Internal note (handoff reasons), never spoken
    SystemNote,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::Assistant => "assistant",
            Sender::Caller => "caller",
            Sender::SystemNote => "system_note",
        }
    }
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Opaque turn identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(String);

impl TurnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TurnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier and instant assigned to a turn when it is appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnStamp {
    pub id: TurnId,
    pub timestamp: DateTime<Utc>,
}

/// Source of turn identifiers and timestamps.
///
/// Identifier generation and the clock live outside the decision engine;
/// implementations are injected so tests can run against a fixed clock.
pub trait TurnStamper: Send {
    fn next_stamp(&mut self) -> TurnStamp;
}

/// Random v4 identifiers stamped with the wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidStamper;

impl TurnStamper for UuidStamper {
    fn next_stamp(&mut self) -> TurnStamp {
        TurnStamp {
            id: TurnId::new(Uuid::new_v4().to_string()),
            timestamp: Utc::now(),
        }
    }
}

/// Deterministic stamper: `turn-1`, `turn-2`, ... one second apart
#[derive(Debug, Clone)]
pub struct SequentialStamper {
    next: u64,
    origin: DateTime<Utc>,
}

impl SequentialStamper {
    pub fn new(origin: DateTime<Utc>) -> Self {
        Self { next: 1, origin }
    }
}

impl Default for SequentialStamper {
    fn default() -> Self {
        Self::new(Utc.timestamp_opt(1_700_000_000, 0).single().unwrap_or_default())
    }
}

impl TurnStamper for SequentialStamper {
    fn next_stamp(&mut self) -> TurnStamp {
        let n = self.next;
        self.next += 1;
        TurnStamp {
            id: TurnId::new(format!("turn-{}", n)),
            timestamp: self.origin + Duration::seconds(n as i64 - 1),
        }
    }
}

/// A single turn in the call transcript. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: TurnId,
    pub sender: Sender,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(stamp: TurnStamp, sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: stamp.id,
            sender,
            content: content.into(),
            timestamp: stamp.timestamp,
        }
    }

    pub fn assistant(stamp: TurnStamp, content: impl Into<String>) -> Self {
        Self::new(stamp, Sender::Assistant, content)
    }

    pub fn caller(stamp: TurnStamp, content: impl Into<String>) -> Self {
        Self::new(stamp, Sender::Caller, content)
    }

    pub fn system_note(stamp: TurnStamp, content: impl Into<String>) -> Self {
        Self::new(stamp, Sender::SystemNote, content)
    }

    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_stamper() {
        let mut stamper = SequentialStamper::default();
        let a = stamper.next_stamp();
        let b = stamper.next_stamp();

        assert_eq!(a.id.as_str(), "turn-1");
        assert_eq!(b.id.as_str(), "turn-2");
        assert_eq!((b.timestamp - a.timestamp).num_seconds(), 1);
    }

    #[test]
    fn test_uuid_stamper_unique() {
        let mut stamper = UuidStamper;
        assert_ne!(stamper.next_stamp().id, stamper.next_stamp().id);
    }

    #[test]
    fn test_turn_creation() {
        let mut stamper = SequentialStamper::default();
        let turn = ConversationTurn::caller(stamper.next_stamp(), "Sounds good to me");

        assert_eq!(turn.sender, Sender::Caller);
        assert_eq!(turn.word_count(), 4);
    }

    #[test]
    fn test_sender_serde() {
        let json = serde_json::to_string(&Sender::SystemNote).unwrap();
        assert_eq!(json, "\"system_note\"");
    }
}
