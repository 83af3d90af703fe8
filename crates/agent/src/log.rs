//! Conversation Log
//!
//! Ordered, append-only transcript for one call. Turn order is insertion
//! order; nothing is edited or removed except by clearing the whole log when
//! a new call starts or the session is reset.

use call_agent_core::{ConversationTurn, Sender};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    turns: Vec<ConversationTurn>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ConversationTurn) -> &ConversationTurn {
        self.turns.push(turn);
        &self.turns[self.turns.len() - 1]
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    /// Turns appended at or after position `from`
    pub fn since(&self, from: usize) -> &[ConversationTurn] {
        self.turns.get(from..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn by_sender(&self, sender: Sender) -> impl Iterator<Item = &ConversationTurn> {
        self.turns.iter().filter(move |t| t.sender == sender)
    }

    /// The last `n` turns from `sender`, oldest first
    pub fn last_n_by_sender(&self, sender: Sender, n: usize) -> Vec<&ConversationTurn> {
        let mut recent: Vec<&ConversationTurn> =
            self.turns.iter().rev().filter(|t| t.sender == sender).take(n).collect();
        recent.reverse();
        recent
    }

    /// Earliest turn from `sender` satisfying `pred`
    pub fn first_matching<F>(&self, sender: Sender, mut pred: F) -> Option<&ConversationTurn>
    where
        F: FnMut(&ConversationTurn) -> bool,
    {
        self.turns.iter().find(|t| t.sender == sender && pred(t))
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}
