//! Board module - routing decisions and per-persona answers.

mod answer;
mod errors;
mod route;

pub use answer::PersonaAnswer;
pub use errors::BoardError;
pub use route::RouteDecision;
