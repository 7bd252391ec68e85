//! Session Gate Port - Interface for per-session question budgeting.

use async_trait::async_trait;

use crate::domain::foundation::ClientSessionId;
use crate::domain::session::GateStatus;

/// Port for the server-side free-question gate.
///
/// State is keyed by client session id; implementations must apply each
/// mutation as an atomic read-modify-write for its session key.
#[async_trait]
pub trait SessionGate: Send + Sync {
    /// Reads the current gate state without mutating it.
    async fn evaluate(&self, session: &ClientSessionId) -> Result<GateView, SessionGateError>;

    /// Records one completed question and returns the resulting state.
    async fn record_question(
        &self,
        session: &ClientSessionId,
    ) -> Result<GateView, SessionGateError>;

    /// Records a successful email capture and returns the resulting state.
    async fn record_email_captured(
        &self,
        session: &ClientSessionId,
    ) -> Result<GateView, SessionGateError>;
}

/// Snapshot of a session's gate state, ready for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateView {
    /// Derived access state.
    pub status: GateStatus,
    /// Completed questions so far.
    pub questions_asked: u32,
    /// Questions left before the upsell state.
    pub remaining: u32,
    /// Whether an email has been captured for this session.
    pub email_captured: bool,
    /// Whether a new question may be asked right now.
    pub allowed: bool,
    /// Whether to prompt for an email after the answer.
    pub prompt_for_email: bool,
}

/// Session gate errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionGateError {
    /// The gate's backing state was unavailable.
    #[error("session gate failure: {0}")]
    Internal(String),
}

impl SessionGateError {
    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
