//! ConsultBoardHandler - concurrent fan-out of one query to many personas.

use std::sync::Arc;

use futures::future;

use crate::application::handlers::AnswerGenerator;
use crate::domain::board::{BoardError, PersonaAnswer};
use crate::domain::persona::Persona;
use crate::ports::CompletionProvider;

/// Command to consult a set of selected personas.
#[derive(Debug, Clone)]
pub struct ConsultBoardCommand {
    pub query: String,
    pub personas: Vec<Persona>,
}

/// Handler that fans one query out to every selected persona concurrently
/// and fans exactly one outcome per persona back in.
///
/// The persona calls share no state and never block on one another. The join
/// waits for all of them to settle; one persona's failure neither cancels nor
/// affects any other. Results come back in selection order regardless of
/// completion order.
pub struct ConsultBoardHandler {
    generator: AnswerGenerator,
}

impl ConsultBoardHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            generator: AnswerGenerator::new(provider),
        }
    }

    pub async fn handle(
        &self,
        cmd: ConsultBoardCommand,
    ) -> Result<Vec<PersonaAnswer>, BoardError> {
        if cmd.query.trim().is_empty() {
            return Err(BoardError::validation("query", "cannot be empty"));
        }
        if cmd.personas.is_empty() {
            return Err(BoardError::validation("personas", "cannot be empty"));
        }

        let answers = future::join_all(
            cmd.personas
                .iter()
                .map(|persona| self.generator.generate(persona, &cmd.query)),
        )
        .await;

        let failed = answers.iter().filter(|a| !a.succeeded).count();
        if failed > 0 {
            tracing::warn!(
                failed,
                total = answers.len(),
                "board consultation completed with partial failures"
            );
        }

        Ok(answers)
    }
}
