//! Chat orchestration: prompt-window assembly and completion dispatch

use super::history::Turn;
use super::session::SessionStore;
use crate::llm::{CompletionError, CompletionRequest, CompletionService};
use crate::system_prompt::FITNESS_SYSTEM_PROMPT;
use std::sync::Arc;

/// Number of stored turns included in the outbound prompt window,
/// counted after the incoming user turn is appended. The system
/// instruction is carried separately and never counted.
pub const WINDOW_TURNS: usize = 6;

/// Output token cap for each completion request
const MAX_TOKENS: u32 = 500;

/// Sampling temperature for each completion request
const TEMPERATURE: f32 = 0.7;

/// Relays a user message to the completion service and records both
/// sides of the exchange in the session's transcript.
pub struct ChatGateway {
    service: Arc<dyn CompletionService>,
}

impl ChatGateway {
    pub fn new(service: Arc<dyn CompletionService>) -> Self {
        Self { service }
    }

    /// Record `user_message`, send the windowed transcript, record the
    /// reply.
    ///
    /// On failure the user turn stays recorded and no assistant turn is
    /// added, so the net transcript delta of a failed exchange is +1.
    /// Callers must reject empty messages before reaching here.
    pub async fn complete(
        &self,
        store: &SessionStore,
        session: &str,
        user_message: &str,
    ) -> Result<String, CompletionError> {
        store.append(session, Turn::user(user_message));

        // Window is taken after the append, so it always includes the
        // message being answered. The store lock is not held across the
        // outbound call.
        let messages = store.window(session, WINDOW_TURNS);

        let request = CompletionRequest {
            system: FITNESS_SYSTEM_PROMPT.to_string(),
            messages,
            max_tokens: Some(MAX_TOKENS),
            temperature: Some(TEMPERATURE),
        };

        let completion = self.service.complete(&request).await?;
        let reply = completion.text.trim().to_string();

        store.append(session, Turn::assistant(reply.clone()));
        Ok(reply)
    }
}
