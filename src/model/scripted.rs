//! In-memory backend that replays canned answers per flow.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::error::{BrandError, Result};
use crate::media::DataUri;

use super::backend::{ModelBackend, ModelRequest, ModelResponse};

/// Answers each call with the next response queued for the calling flow and
/// records every request it receives.
#[derive(Default)]
pub struct ScriptedBackend {
    answers: Mutex<HashMap<&'static str, VecDeque<Result<ModelResponse>>>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw answer for `flow`.
    pub fn on(self, flow: &'static str, answer: Result<ModelResponse>) -> Self {
        self.answers
            .lock()
            .unwrap()
            .entry(flow)
            .or_default()
            .push_back(answer);
        self
    }

    pub fn text(self, flow: &'static str, text: impl Into<String>) -> Self {
        self.on(flow, Ok(ModelResponse::with_text(text)))
    }

    pub fn json(self, flow: &'static str, value: serde_json::Value) -> Self {
        self.text(flow, value.to_string())
    }

    pub fn media(self, flow: &'static str, media: DataUri) -> Self {
        self.on(flow, Ok(ModelResponse::with_media(media)))
    }

    pub fn fail(self, flow: &'static str, err: BrandError) -> Self {
        self.on(flow, Err(err))
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, flow: &str) -> Vec<ModelRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.flow == flow)
            .collect()
    }
}

impl ModelBackend for ScriptedBackend {
    async fn generate(&self, request: ModelRequest) -> Result<ModelResponse> {
        let flow = request.flow;
        self.requests.lock().unwrap().push(request);
        self.answers
            .lock()
            .unwrap()
            .get_mut(flow)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                Err(BrandError::remote_call_failed(format!(
                    "no scripted answer for {}",
                    flow
                )))
            })
    }
}
