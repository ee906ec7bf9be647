//! Scripted completion service for tests

use super::{Completion, CompletionError, CompletionRequest, CompletionService, Usage};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A completion service that replays scripted outcomes in order and
/// records every request it receives.
#[derive(Default)]
pub struct ScriptedService {
    outcomes: Mutex<VecDeque<Result<Completion, CompletionError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_reply(&self, text: impl Into<String>) {
        self.outcomes.lock().unwrap().push_back(Ok(Completion {
            text: text.into(),
            usage: Usage::default(),
        }));
    }

    pub fn push_error(&self, error: CompletionError) {
        self.outcomes.lock().unwrap().push_back(Err(error));
    }

    /// Requests seen so far, in call order
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionService for ScriptedService {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, CompletionError> {
        self.requests.lock().unwrap().push(request.clone());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CompletionError::unknown("no scripted outcome left")))
    }

    fn model_id(&self) -> &str {
        "scripted-test-model"
    }
}
