//! Stub text generators for handler and service tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quill_config::RelayConfig;
use quill_core::RelayError;
use quill_llm::TextGenerator;

use crate::ServerState;

/// Returns the prompt it was given.
pub struct EchoGenerator;

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn generate(&self, _model: &str, prompt: &str) -> Result<String, RelayError> {
        Ok(prompt.to_string())
    }
}

/// Always fails with the given description.
pub struct FailingGenerator(pub String);

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _model: &str, _prompt: &str) -> Result<String, RelayError> {
        Err(RelayError::Upstream(self.0.clone()))
    }
}

/// Replies with fixed text and records every `(model, prompt)` call.
#[derive(Clone)]
pub struct RecordingGenerator {
    reply: String,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: Arc::default(),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        Ok(self.reply.clone())
    }
}

/// Server state around `generator` with default configuration.
pub fn state_with(generator: impl TextGenerator + 'static) -> Arc<ServerState> {
    Arc::new(ServerState::new(Arc::new(generator), &RelayConfig::default()))
}
