//! Per-persona answer outcomes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PersonaId;

/// One persona's outcome for one query.
///
/// A failed generation is a first-class outcome, not an absence: the
/// orchestrator returns exactly one answer per selected persona, and a
/// failure for one persona never hides the successes of the others.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaAnswer {
    /// The persona that produced (or failed to produce) this answer.
    pub persona_id: PersonaId,
    /// The model's literal output text; `None` when generation failed.
    pub text: Option<String>,
    /// Whether generation succeeded.
    pub succeeded: bool,
}

impl PersonaAnswer {
    /// Creates a successful answer.
    pub fn success(persona_id: PersonaId, text: impl Into<String>) -> Self {
        Self {
            persona_id,
            text: Some(text.into()),
            succeeded: true,
        }
    }

    /// Creates a failure marker for a persona whose generation errored.
    pub fn failure(persona_id: PersonaId) -> Self {
        Self {
            persona_id,
            text: None,
            succeeded: false,
        }
    }
}
