//! OpenAI chat-completions client

use super::types::{Completion, CompletionRequest, Usage};
use super::{CompletionError, CompletionService};
use crate::chat::{Role, Turn};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default chat-completion model
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// OpenAI-compatible completion service
pub struct OpenAIService {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAIService {
    /// Create a client for OpenAI or any chat-completions-compatible
    /// endpoint (`base_url` override).
    pub fn new(api_key: String, model: Option<&str>, base_url: Option<&str>) -> Self {
        let endpoint = format!(
            "{}/v1/chat/completions",
            base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/')
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_key,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
            endpoint,
        }
    }

    fn translate_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);

        // System instruction goes first, exactly once
        if !request.system.is_empty() {
            messages.push(OpenAIMessage {
                role: "system".to_string(),
                content: Some(request.system.clone()),
            });
        }

        for turn in &request.messages {
            messages.push(OpenAIMessage::from_turn(turn));
        }

        OpenAIRequest {
            model: self.model.clone(),
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            stream: false,
        }
    }

    fn normalize_response(resp: OpenAIResponse) -> Result<Completion, CompletionError> {
        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| CompletionError::malformed("No choices in response"))?;

        Ok(Completion {
            text: choice.message.content.unwrap_or_default(),
            usage: Usage {
                input_tokens: u64::from(resp.usage.prompt_tokens),
                output_tokens: u64::from(resp.usage.completion_tokens),
            },
        })
    }

    /// Map a non-success HTTP response to a classified error. The
    /// provider's own message is carried verbatim where the body parses.
    fn classify_http_error(status: reqwest::StatusCode, body: &str) -> CompletionError {
        if let Ok(error_resp) = serde_json::from_str::<OpenAIErrorResponse>(body) {
            let message = error_resp.error.message;
            return match status.as_u16() {
                401 | 403 => CompletionError::auth(message),
                429 => CompletionError::rate_limit(message),
                400 => CompletionError::invalid_request(message),
                500..=599 => CompletionError::server_error(message),
                _ => CompletionError::unknown(format!("HTTP {status}: {message}")),
            };
        }
        CompletionError::unknown(format!("HTTP {status} error: {body}"))
    }
}

#[async_trait]
impl CompletionService for OpenAIService {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        let openai_request = self.translate_request(request);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&openai_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::network(format!("Request timeout: {e}"))
                } else if e.is_connect() {
                    CompletionError::network(format!("Connection failed: {e}"))
                } else {
                    CompletionError::unknown(format!("Request failed: {e}"))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CompletionError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_http_error(status, &body));
        }

        let openai_response: OpenAIResponse = serde_json::from_str(&body)
            .map_err(|e| CompletionError::malformed(format!("Failed to parse response: {e}")))?;

        Self::normalize_response(openai_response)
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

impl OpenAIMessage {
    fn from_turn(turn: &Turn) -> Self {
        let role = match turn.role {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        };
        Self {
            role: role.to_string(),
            content: Some(turn.content.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: OpenAIUsage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    #[allow(dead_code)] // Part of API response, not currently inspected
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    #[allow(dead_code)] // Part of API response, not always used
    total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
    #[allow(dead_code)]
    r#type: Option<String>,
    #[allow(dead_code)]
    code: Option<String>,
}
