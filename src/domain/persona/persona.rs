//! Persona value objects.
//!
//! A persona is a named, pre-scripted identity with fixed response
//! instructions and display styling. Personas are immutable for the lifetime
//! of the process: defined once at startup (or supplied by the caller per
//! request), never created or destroyed at runtime.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{PersonaId, ValidationError};

/// Presentation metadata for a persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaStyle {
    /// Short role label shown next to the name (e.g. "Visionary").
    pub role: String,
    /// Emoji avatar.
    pub avatar: String,
    /// Message bubble background color.
    pub background_color: String,
    /// Message bubble text color.
    pub text_color: String,
}

impl PersonaStyle {
    pub fn new(
        role: impl Into<String>,
        avatar: impl Into<String>,
        background_color: impl Into<String>,
        text_color: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            avatar: avatar.into(),
            background_color: background_color.into(),
            text_color: text_color.into(),
        }
    }
}

impl Default for PersonaStyle {
    fn default() -> Self {
        // Neutral bubble used when a caller-supplied persona carries no styling.
        Self::new("Advisor", "", "#f1f1f1", "#000000")
    }
}

/// A board member: identity, answering instructions, display styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Stable slug identifier.
    pub id: PersonaId,
    /// Display name. Router matching is case-sensitive against this value.
    pub name: String,
    /// System instructions sent with every answer request for this persona.
    pub instructions: String,
    /// Presentation metadata.
    pub style: PersonaStyle,
}

impl Persona {
    /// Creates a persona with default styling.
    ///
    /// Name and instructions must be non-blank; the id is validated by
    /// [`PersonaId::new`] if not already constructed.
    pub fn new(
        id: PersonaId,
        name: impl Into<String>,
        instructions: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        let instructions = instructions.into();
        if instructions.trim().is_empty() {
            return Err(ValidationError::empty_field("instructions"));
        }
        Ok(Self {
            id,
            name,
            instructions,
            style: PersonaStyle::default(),
        })
    }

    /// Sets the presentation styling.
    pub fn with_style(mut self, style: PersonaStyle) -> Self {
        self.style = style;
        self
    }
}
