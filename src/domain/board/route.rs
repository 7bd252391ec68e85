//! Routing decision - which personas should answer a query.

use crate::domain::foundation::PersonaId;
use crate::domain::persona::Persona;

/// The subset of personas selected to answer one query.
///
/// Derived per query from the router model's raw reply and discarded once the
/// orchestrator has consumed it.
///
/// Invariants:
/// - every selected id corresponds to a persona in the candidate list;
/// - the selection preserves candidate-list order, not model-output order;
/// - the selection is never empty: when the model's reply matches no known
///   display name, the decision falls back to all candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    selected: Vec<PersonaId>,
    fallback: bool,
}

impl RouteDecision {
    /// Parses the router model's raw reply against the candidate personas.
    ///
    /// The reply is split on commas, tokens are whitespace-trimmed and matched
    /// case-sensitively against display names. Unmatched tokens are dropped
    /// silently. Zero matches (including an unparsable reply) selects the
    /// whole candidate list.
    pub fn from_model_output(raw: &str, personas: &[Persona]) -> Self {
        let tokens: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect();

        let selected: Vec<PersonaId> = personas
            .iter()
            .filter(|p| tokens.iter().any(|t| *t == p.name))
            .map(|p| p.id.clone())
            .collect();

        if selected.is_empty() {
            Self::select_all(personas)
        } else {
            Self {
                selected,
                fallback: false,
            }
        }
    }

    /// Selects every candidate persona (the fallback decision).
    pub fn select_all(personas: &[Persona]) -> Self {
        Self {
            selected: personas.iter().map(|p| p.id.clone()).collect(),
            fallback: true,
        }
    }

    /// The selected persona ids, in candidate-list order.
    pub fn selected_ids(&self) -> &[PersonaId] {
        &self.selected
    }

    /// True when the decision fell back to all personas.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    /// Resolves the selection back to personas from the candidate list.
    pub fn selected_personas<'a>(&self, personas: &'a [Persona]) -> Vec<&'a Persona> {
        self.selected
            .iter()
            .filter_map(|id| personas.iter().find(|p| &p.id == id))
            .collect()
    }
}
