//! AnswerGenerator - one persona, one query, one answer.

use std::sync::Arc;

use crate::domain::board::PersonaAnswer;
use crate::domain::persona::Persona;
use crate::ports::{CompletionProvider, CompletionRequest};

/// Produces a single persona's answer by delegating to the model.
///
/// Failure is isolated here: a transport or model error becomes a
/// `PersonaAnswer` failure marker for this persona alone, logged with the
/// persona id and reported upward. There is no retry and no caching; each
/// call is one independent outbound request.
pub struct AnswerGenerator {
    provider: Arc<dyn CompletionProvider>,
}

impl AnswerGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Generates an answer for `persona` to `query`.
    ///
    /// The persona's instructions ride as the model's system instructions and
    /// the query as its input; the model's literal output text becomes the
    /// answer.
    pub async fn generate(&self, persona: &Persona, query: &str) -> PersonaAnswer {
        let request = CompletionRequest::new(query).with_instructions(&persona.instructions);

        match self.provider.complete(request).await {
            Ok(response) => PersonaAnswer::success(persona.id.clone(), response.output_text),
            Err(err) => {
                tracing::error!(
                    persona_id = %persona.id,
                    error = %err,
                    "persona answer generation failed"
                );
                PersonaAnswer::failure(persona.id.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockCompletionProvider, MockError};
    use crate::domain::foundation::PersonaId;

    fn persona(id: &str, name: &str, instructions: &str) -> Persona {
        Persona::new(PersonaId::new(id).unwrap(), name, instructions).unwrap()
    }

    #[tokio::test]
    async fn success_returns_model_output_verbatim() {
        let provider = MockCompletionProvider::new().with_response("Make it insanely great.");
        let generator = AnswerGenerator::new(Arc::new(provider.clone()));

        let answer = generator
            .generate(
                &persona("steve-jobs", "Steve Jobs", "You are Steve Jobs."),
                "What should we build?",
            )
            .await;

        assert!(answer.succeeded);
        assert_eq!(answer.text.as_deref(), Some("Make it insanely great."));

        // The persona instructions and query were both forwarded.
        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].instructions.as_deref(),
            Some("You are Steve Jobs.")
        );
        assert_eq!(calls[0].input, "What should we build?");
    }

    #[tokio::test]
    async fn provider_error_becomes_failure_marker() {
        let provider = MockCompletionProvider::new().with_error(MockError::Network {
            message: "connection reset".to_string(),
        });
        let generator = AnswerGenerator::new(Arc::new(provider));

        let answer = generator
            .generate(&persona("elon-musk", "Elon Musk", "You are Elon Musk."), "Mars?")
            .await;

        assert!(!answer.succeeded);
        assert!(answer.text.is_none());
        assert_eq!(answer.persona_id.as_str(), "elon-musk");
    }
}
