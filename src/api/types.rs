//! API request and response types

use crate::chat::Turn;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Conversation to address; the shared default session when absent
    pub session: Option<String>,
}

/// Reply to a chat message.
///
/// Failures are reported in-band: HTTP 200 with `status: "error"` and the
/// failure text in `response`.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<&'static str>,
}

impl ChatResponse {
    pub fn success(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: Some("success"),
        }
    }

    pub fn error(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: Some("error"),
        }
    }

    /// Reply with no status field (the canned empty-message answer)
    pub fn plain(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            status: None,
        }
    }
}

/// Request to clear a conversation
#[derive(Debug, Default, Deserialize)]
pub struct ClearRequest {
    pub session: Option<String>,
}

/// Bare status acknowledgement
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Transcript of a conversation
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub turns: Vec<Turn>,
}
