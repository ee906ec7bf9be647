//! Common types for completion requests and responses

use crate::chat::Turn;

/// A single completion request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// System instruction. Sent first on the wire and never counted
    /// toward the conversation window.
    pub system: String,
    /// Conversation window, oldest first
    pub messages: Vec<Turn>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Completion result
#[derive(Debug, Clone)]
pub struct Completion {
    /// Reply text as returned by the provider, untrimmed
    pub text: String,
    pub usage: Usage,
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
