//! Data transfer objects for HTTP message serialization.

use quill_core::Action;
use serde::{Deserialize, Serialize};

/// Request body for the AI edit endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AiRequest {
    pub action: Action,
    pub text: String,
    /// Absent and `null` both select the default model.
    #[serde(default)]
    pub model: Option<String>,
}

/// Successful AI edit response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiResponse {
    pub result: String,
}
