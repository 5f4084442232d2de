use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use salamgate_core::{Completion, CompletionRequest, GateError, ModelClient};

/// A scripted model client for tests: returns queued completions in
/// order and records every request it receives.
pub struct MockModelClient {
    script: Mutex<VecDeque<Result<Completion, GateError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn push(self, completion: Completion) -> Self {
        self.script.lock().unwrap().push_back(Ok(completion));
        self
    }

    pub fn push_text(self, text: impl Into<String>) -> Self {
        self.push(Completion::Text(text.into()))
    }

    pub fn push_error(self, error: GateError) -> Self {
        self.script.lock().unwrap().push_back(Err(error));
        self
    }

    /// Requests observed so far, oldest first.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, GateError> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Completion::Text("mock response".to_string())))
    }
}
