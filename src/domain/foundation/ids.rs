//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a persona.
///
/// Persona ids are caller-chosen slugs (e.g. `steve-jobs`), stable for the
/// lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(String);

impl PersonaId {
    /// Creates a PersonaId, rejecting empty or blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("persona_id"));
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PersonaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a client session.
///
/// Minted by the client and carried on requests via the `X-Session-Id`
/// header; the gate keys its per-session state on this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientSessionId(Uuid);

impl ClientSessionId {
    /// Creates a new random ClientSessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ClientSessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ClientSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ClientSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persona_id_rejects_empty() {
        assert!(PersonaId::new("").is_err());
        assert!(PersonaId::new("   ").is_err());
    }

    #[test]
    fn persona_id_accepts_slug() {
        let id = PersonaId::new("steve-jobs").unwrap();
        assert_eq!(id.as_str(), "steve-jobs");
        assert_eq!(id.to_string(), "steve-jobs");
    }

    #[test]
    fn persona_id_serializes_transparently() {
        let id = PersonaId::new("warren-buffett").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"warren-buffett\"");
    }

    #[test]
    fn client_session_id_round_trips_through_string() {
        let id = ClientSessionId::new();
        let parsed: ClientSessionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn client_session_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<ClientSessionId>().is_err());
    }
}
