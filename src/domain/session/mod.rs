//! Session module - the free-question gate.

mod gate;

pub use gate::{GateDecision, GateStatus, QuestionPolicy, SessionState};
