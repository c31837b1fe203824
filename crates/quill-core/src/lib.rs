//! Core domain types and error definitions for quill.
//!
//! This crate provides the pieces every other quill crate shares:
//!
//! - [`Action`] — Closed set of text transformations with a pass-through default
//! - [`render_prompt`] — Builds the upstream prompt for an action keyword
//! - [`validate_text`] — Trims caller text and rejects empty input
//! - [`RelayError`] — Error type for validation and upstream failures
//!
//! # Example
//!
//! ```rust
//! use quill_core::{render_prompt, validate_text, Action};
//!
//! let text = validate_text("  He go to school.  ").unwrap();
//! assert_eq!(text, "He go to school.");
//!
//! let prompt = render_prompt("grammar", text);
//! assert_eq!(prompt, "Fix grammar and spelling mistakes in this text:\n\nHe go to school.");
//!
//! assert_eq!(Action::from("shout"), Action::Passthrough);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Model used when a request does not name one.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// Message returned to callers that submit blank text.
pub const EMPTY_TEXT_MESSAGE: &str = "Text cannot be empty";

/// Errors that can occur while relaying a request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// Caller-supplied text was empty after trimming.
    #[error("Text cannot be empty")]
    Validation,

    /// The text generation service failed. Carries the raw description.
    #[error("{0}")]
    Upstream(String),
}

/// A text transformation requested by the caller.
///
/// Unknown keywords map to [`Action::Passthrough`], which forwards the text as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Rewrite,
    Summarize,
    Grammar,
    Passthrough,
}

impl Action {
    /// Keyword for this action, or `None` for pass-through.
    pub fn keyword(&self) -> Option<&'static str> {
        match self {
            Self::Rewrite => Some("rewrite"),
            Self::Summarize => Some("summarize"),
            Self::Grammar => Some("grammar"),
            Self::Passthrough => None,
        }
    }

    /// Instruction placed before the text, or `None` for pass-through.
    pub fn instruction(&self) -> Option<&'static str> {
        match self {
            Self::Rewrite => Some("Rewrite this text professionally and clearly:"),
            Self::Summarize => Some("Summarize this text in 3 short bullet points:"),
            Self::Grammar => Some("Fix grammar and spelling mistakes in this text:"),
            Self::Passthrough => None,
        }
    }

    /// Renders the prompt for `text`.
    pub fn render(&self, text: &str) -> String {
        match self.instruction() {
            Some(instruction) => format!("{}\n\n{}", instruction, text),
            None => text.to_string(),
        }
    }
}

impl From<&str> for Action {
    fn from(keyword: &str) -> Self {
        match keyword {
            "rewrite" => Self::Rewrite,
            "summarize" => Self::Summarize,
            "grammar" => Self::Grammar,
            _ => Self::Passthrough,
        }
    }
}

impl From<String> for Action {
    fn from(keyword: String) -> Self {
        Self::from(keyword.as_str())
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("passthrough"))
    }
}

/// Renders the prompt for an action keyword and already-validated text.
pub fn render_prompt(action: &str, text: &str) -> String {
    Action::from(action).render(text)
}

/// Trims `text`, rejecting input that is empty or whitespace only.
pub fn validate_text(text: &str) -> Result<&str, RelayError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RelayError::Validation);
    }
    Ok(trimmed)
}
