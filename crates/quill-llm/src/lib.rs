//! Text generation clients for quill.
//!
//! - [`TextGenerator`] — Trait the relay calls; implement it to plug in a backend or a test stub
//! - [`GeminiClient`] — Google Gemini `generateContent` client over reqwest
//!
//! # Example
//!
//! ```rust,ignore
//! use quill_llm::{GeminiClient, TextGenerator};
//!
//! let client = GeminiClient::new(Some(api_key), "https://generativelanguage.googleapis.com");
//! let text = client.generate("gemini-2.5-flash-lite", "Say hi").await?;
//! ```

mod gemini;

use async_trait::async_trait;
use quill_core::RelayError;

pub use gemini::GeminiClient;

/// A backend that turns a prompt into generated text.
///
/// Every failure is reported as [`RelayError::Upstream`].
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for `prompt` with the given model identifier.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, RelayError>;
}

/// Converts any error into a `RelayError::Upstream`.
pub(crate) fn upstream_err(e: impl ToString) -> RelayError {
    RelayError::Upstream(e.to_string())
}
