//! RouteQueryHandler - selects the personas that should answer a query.

use std::sync::Arc;

use crate::domain::board::{BoardError, RouteDecision};
use crate::domain::persona::Persona;
use crate::ports::{CompletionProvider, CompletionRequest};

/// Command to route a query across candidate personas.
#[derive(Debug, Clone)]
pub struct RouteQueryCommand {
    pub query: String,
    pub personas: Vec<Persona>,
}

/// Result of routing: the decision plus the matched display names.
#[derive(Debug, Clone)]
pub struct RouteQueryResult {
    pub decision: RouteDecision,
    /// Display names of the selected personas, in selection order.
    pub selected_names: Vec<String>,
}

/// Handler that asks the model which personas should answer.
///
/// A model failure here is a hard failure for the whole query. An answer
/// that matches no known persona is not: that case resolves to the
/// all-personas fallback inside [`RouteDecision`].
pub struct RouteQueryHandler {
    provider: Arc<dyn CompletionProvider>,
}

impl RouteQueryHandler {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    pub async fn handle(&self, cmd: RouteQueryCommand) -> Result<RouteQueryResult, BoardError> {
        if cmd.query.trim().is_empty() {
            return Err(BoardError::validation("query", "cannot be empty"));
        }
        if cmd.personas.is_empty() {
            return Err(BoardError::validation("personas", "cannot be empty"));
        }

        let prompt = build_router_prompt(&cmd.query, &cmd.personas);
        let response = self
            .provider
            .complete(CompletionRequest::new(prompt))
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "router model call failed");
                BoardError::routing_failed(err.to_string())
            })?;

        let decision = RouteDecision::from_model_output(&response.output_text, &cmd.personas);
        if decision.is_fallback() {
            tracing::debug!(
                raw = %response.output_text,
                "router reply matched no persona, falling back to the full board"
            );
        }

        let selected_names = decision
            .selected_personas(&cmd.personas)
            .iter()
            .map(|p| p.name.clone())
            .collect();

        Ok(RouteQueryResult {
            decision,
            selected_names,
        })
    }
}

/// Builds the single routing instruction enumerating the candidate names.
fn build_router_prompt(query: &str, personas: &[Persona]) -> String {
    let names = personas
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a query router for an AI advisory board with multiple personas.\n\
         Given a user's question, determine which board member(s) would be most \
         appropriate to answer.\n\n\
         Available board members: {names}\n\n\
         IMPORTANT: Respond ONLY with the names of the board members who should \
         answer, separated by commas.\n\
         Do not include any explanations or additional text - just the names.\n\n\
         For example:\n\
         - For a question about product innovation, you might respond: \"Steve Jobs\"\n\
         - For a question about both investing and technology, you might respond: \
         \"Warren Buffett, Elon Musk\"\n\n\
         User question: {query}\n\n\
         Appropriate board members:"
    )
}
