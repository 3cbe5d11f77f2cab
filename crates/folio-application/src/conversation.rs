//! Caller-owned conversation history.

use folio_core::{ChatTurn, ProfileRecord};

/// Ordered, append-only list of chat turns.
///
/// Turns are moved in and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
}

impl Conversation {
    /// Starts a conversation with the assistant greeting for `profile`.
    pub fn new(profile: &ProfileRecord) -> Self {
        Self {
            turns: vec![ChatTurn::assistant(Self::greeting(profile))],
        }
    }

    /// The opening line shown before the visitor types anything.
    pub fn greeting(profile: &ProfileRecord) -> String {
        let name = profile.display_name();
        if name.is_empty() {
            "Hey 👋 I'm an AI assistant. How can I help you today?".to_string()
        } else {
            format!("Hey 👋 I'm {name}'s AI assistant. How can I help you today?")
        }
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
