//! Text edit service: validate, render the prompt, call the generator.

use quill_core::{validate_text, Action, RelayError};
use quill_llm::TextGenerator;
use tracing::debug;

/// Runs one edit. The generator is not called when `text` is blank.
pub async fn run(
    generator: &dyn TextGenerator,
    action: Action,
    text: &str,
    model: &str,
) -> Result<String, RelayError> {
    let text = validate_text(text)?;
    let prompt = action.render(text);
    debug!("Prompt for {}: {} chars", action, prompt.len());

    let output = generator.generate(model, &prompt).await?;
    Ok(output.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EchoGenerator, FailingGenerator, RecordingGenerator};

    const MODEL: &str = "gemini-2.5-flash-lite";

    #[tokio::test]
    async fn summarize_with_echo_returns_trimmed_prompt() {
        let result = run(&EchoGenerator, Action::Summarize, "  Long report body.  ", MODEL)
            .await
            .unwrap();
        assert_eq!(
            result,
            "Summarize this text in 3 short bullet points:\n\nLong report body."
        );
    }

    #[tokio::test]
    async fn output_is_trimmed() {
        let generator = RecordingGenerator::replying("\n  Polished text.  \n");
        let result = run(&generator, Action::Rewrite, "rough text", MODEL).await.unwrap();
        assert_eq!(result, "Polished text.");
    }

    #[tokio::test]
    async fn blank_text_never_reaches_generator() {
        let generator = RecordingGenerator::replying("unused");
        for text in ["", "   ", "\n\t"] {
            let err = run(&generator, Action::Grammar, text, MODEL).await.unwrap_err();
            assert_eq!(err, RelayError::Validation);
        }
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn generator_sees_model_and_prompt() {
        let generator = RecordingGenerator::replying("ok");
        run(&generator, Action::Passthrough, " raw ", "gemini-2.5-pro").await.unwrap();
        assert_eq!(
            generator.calls(),
            vec![("gemini-2.5-pro".to_string(), "raw".to_string())]
        );
    }

    #[tokio::test]
    async fn upstream_failure_is_forwarded() {
        for action in [Action::Rewrite, Action::Summarize, Action::Grammar, Action::Passthrough] {
            let err = run(&FailingGenerator("429 quota exceeded".into()), action, "text", MODEL)
                .await
                .unwrap_err();
            assert_eq!(err, RelayError::Upstream("429 quota exceeded".into()));
        }
    }

    #[tokio::test]
    async fn identical_input_gives_identical_output() {
        let first = run(&EchoGenerator, Action::Grammar, "He go.", MODEL).await.unwrap();
        let second = run(&EchoGenerator, Action::Grammar, "He go.", MODEL).await.unwrap();
        assert_eq!(first, second);
    }
}
