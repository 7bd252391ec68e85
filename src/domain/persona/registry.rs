//! Static, ordered persona registry.
//!
//! The registry is built once at startup and never mutated. Presentation
//! order, routing fallback, and answer ordering all derive from the order the
//! personas were registered in.

use once_cell::sync::Lazy;

use crate::domain::foundation::{PersonaId, ValidationError};

use super::persona::{Persona, PersonaStyle};

/// Ordered, immutable collection of personas.
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: Vec<Persona>,
}

impl PersonaRegistry {
    /// Creates a registry from an ordered persona list.
    ///
    /// The list must be non-empty and ids must be unique.
    pub fn new(personas: Vec<Persona>) -> Result<Self, ValidationError> {
        if personas.is_empty() {
            return Err(ValidationError::empty_field("personas"));
        }
        for (i, persona) in personas.iter().enumerate() {
            if personas[..i].iter().any(|p| p.id == persona.id) {
                return Err(ValidationError::invalid_format(
                    "personas",
                    format!("duplicate persona id '{}'", persona.id),
                ));
            }
        }
        Ok(Self { personas })
    }

    /// The default board shipped with the application.
    pub fn default_board() -> &'static PersonaRegistry {
        &DEFAULT_BOARD
    }

    /// All personas, in registration order.
    pub fn all(&self) -> &[Persona] {
        &self.personas
    }

    /// Looks up a persona by id.
    pub fn by_id(&self, id: &PersonaId) -> Option<&Persona> {
        self.personas.iter().find(|p| &p.id == id)
    }

    /// Looks up a persona by display name (case-sensitive).
    pub fn by_name(&self, name: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.name == name)
    }

    /// Number of registered personas.
    pub fn len(&self) -> usize {
        self.personas.len()
    }

    /// Always false: construction rejects empty registries.
    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

static DEFAULT_BOARD: Lazy<PersonaRegistry> = Lazy::new(|| {
    let personas = vec![
        Persona::new(
            PersonaId::new("steve-jobs").expect("static persona id"),
            "Steve Jobs",
            "You are Steve Jobs. Focus on product vision, design simplicity, and \
             revolutionary ideas. Be direct, passionate, and uncompromising about \
             quality. Speak about \"insanely great\" products and challenge \
             conventional thinking.",
        )
        .expect("static persona")
        .with_style(PersonaStyle::new("Visionary", "👨‍💼", "#e6e6e6", "#000000")),
        Persona::new(
            PersonaId::new("warren-buffett").expect("static persona id"),
            "Warren Buffett",
            "You are Warren Buffett. Focus on long-term value, financial stability, \
             and sound business fundamentals. Speak about patience, margin of \
             safety, and intrinsic value. Be folksy but wise, using clear analogies.",
        )
        .expect("static persona")
        .with_style(PersonaStyle::new("Investor", "💰", "#f5f5dc", "#000000")),
        Persona::new(
            PersonaId::new("elon-musk").expect("static persona id"),
            "Elon Musk",
            "You are Elon Musk. Focus on bold technological innovation, \
             multi-planetary existence, and sustainable energy. Be direct, \
             occasionally quirky, and talk about ambitious goals. Reference physics \
             first principles and exponential thinking.",
        )
        .expect("static persona")
        .with_style(PersonaStyle::new("Innovator", "🚀", "#e6f7ff", "#000000")),
    ];

    PersonaRegistry::new(personas).expect("default board is valid")
});
