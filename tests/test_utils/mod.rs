//! Test utilities for integration tests
use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use chatmode::chat::Turn;
use chatmode::openai::{ApiError, CompletionApi, CompletionRequest, CompletionResponse};

/// A completion API that replays a fixed list of results in order and
/// records every request it receives.
pub struct ScriptedApi {
    responses: Mutex<VecDeque<Result<CompletionResponse, ApiError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedApi {
    pub fn new(responses: Vec<Result<CompletionResponse, ApiError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionApi for ScriptedApi {
    async fn submit(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("ScriptedApi ran out of responses")
    }
}

/// Lets `ScriptedApi` be shared with the adapter while the test keeps
/// a handle to inspect the recorded requests.
#[async_trait]
impl<'a> CompletionApi for &'a ScriptedApi {
    async fn submit(&self, request: &CompletionRequest) -> Result<CompletionResponse, ApiError> {
        (**self).submit(request).await
    }
}

pub fn ok(text: &str, total_tokens: u64) -> Result<CompletionResponse, ApiError> {
    Ok(CompletionResponse {
        text: text.to_string(),
        total_tokens,
    })
}

pub fn overflow() -> Result<CompletionResponse, ApiError> {
    Err(ApiError::ContextOverflow(String::from(
        "This model's maximum context length is 4097 tokens",
    )))
}

pub fn turns(pairs: &[(&str, &str)]) -> Vec<Turn> {
    pairs.iter().map(|(u, b)| Turn::new(u, b)).collect()
}
