//! Conversation turns and per-conversation transcript storage

use serde::{Deserialize, Serialize};

/// Speaker role for a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in a conversation, immutable once created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered transcript of a single conversation.
///
/// Append-only except for `clear`. Stored size is unbounded; only the
/// window sent to the completion API is bounded. Turns are never edited
/// or removed individually.
#[derive(Debug, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a turn at the end of the transcript
    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Empty the transcript. Idempotent.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Read-only view of the full transcript, oldest first
    pub fn snapshot(&self) -> &[Turn] {
        &self.turns
    }

    /// The last `min(k, len)` turns in chronological order.
    ///
    /// Derived at call time; the stored transcript is not truncated.
    pub fn window(&self, k: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(k);
        &self.turns[start..]
    }
}
