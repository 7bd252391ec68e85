//! HTTP DTOs for the board endpoints.
//!
//! These types define the JSON request/response structure for routing and
//! consultation. Keys are camelCase, matching the browser client.

use serde::{Deserialize, Serialize};

use crate::domain::board::PersonaAnswer;
use crate::domain::foundation::{PersonaId, ValidationError};
use crate::domain::persona::{Persona, PersonaStyle};
use crate::domain::session::GateStatus;
use crate::ports::GateView;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// A caller-supplied persona for routing: the display name is what the router
/// matches against.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePersonaDto {
    pub id: String,
    pub name: String,
    pub system_prompt: String,
}

/// Request to route a query across candidate personas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    pub query: String,
    pub personas: Vec<RoutePersonaDto>,
}

/// A caller-supplied persona for consultation; the name is optional because
/// answering only needs the id and instructions.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardPersonaDto {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub system_prompt: String,
}

/// Request to consult a set of personas.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardRequest {
    pub query: String,
    pub personas: Vec<BoardPersonaDto>,
}

impl RoutePersonaDto {
    /// Converts to a domain persona.
    pub fn into_persona(self) -> Result<Persona, ValidationError> {
        Persona::new(PersonaId::new(self.id)?, self.name, self.system_prompt)
    }
}

impl BoardPersonaDto {
    /// Converts to a domain persona, defaulting the name to the id.
    pub fn into_persona(self) -> Result<Persona, ValidationError> {
        let id = PersonaId::new(self.id)?;
        let name = self.name.unwrap_or_else(|| id.as_str().to_string());
        Persona::new(id, name, self.system_prompt)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for the routing endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResponse {
    /// Display names of the personas that should answer, in board order.
    pub selected_persona_names: Vec<String>,
}

/// One persona's outcome in the consultation response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaAnswerDto {
    pub persona_id: String,
    /// The answer text; null when this persona's generation failed.
    pub response: Option<String>,
    pub succeeded: bool,
}

impl From<PersonaAnswer> for PersonaAnswerDto {
    fn from(answer: PersonaAnswer) -> Self {
        Self {
            persona_id: answer.persona_id.to_string(),
            response: answer.text,
            succeeded: answer.succeeded,
        }
    }
}

/// Session gate snapshot attached to gated responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateDto {
    pub status: GateStatus,
    pub questions_asked: u32,
    pub remaining: u32,
    pub email_captured: bool,
    pub prompt_for_email: bool,
}

impl From<GateView> for GateDto {
    fn from(view: GateView) -> Self {
        Self {
            status: view.status,
            questions_asked: view.questions_asked,
            remaining: view.remaining,
            email_captured: view.email_captured,
            prompt_for_email: view.prompt_for_email,
        }
    }
}

/// Response for the consultation endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    pub responses: Vec<PersonaAnswerDto>,
    /// Present only when the request carried a session id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateDto>,
}

/// A board member definition as served to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaDefinitionDto {
    pub id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
    pub system_prompt: String,
    pub style: PersonaStyleDto,
}

/// Persona display styling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonaStyleDto {
    pub background_color: String,
    pub text_color: String,
}

impl From<&Persona> for PersonaDefinitionDto {
    fn from(persona: &Persona) -> Self {
        let PersonaStyle {
            role,
            avatar,
            background_color,
            text_color,
        } = persona.style.clone();
        Self {
            id: persona.id.to_string(),
            name: persona.name.clone(),
            role,
            avatar,
            system_prompt: persona.instructions.clone(),
            style: PersonaStyleDto {
                background_color,
                text_color,
            },
        }
    }
}

/// Response for the default board listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonasResponse {
    pub personas: Vec<PersonaDefinitionDto>,
}

/// Response for the session status endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub session_id: String,
    #[serde(flatten)]
    pub gate: GateDto,
}
