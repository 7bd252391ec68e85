//! In-memory session gate implementation.
//!
//! Per-session question budgets keyed by client session id, held in a
//! mutex-guarded map. Suitable for a single-server deployment; state does not
//! survive a restart. A deployment that needs durable or multi-server gating
//! would implement the `SessionGate` port against shared storage instead.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::ClientSessionId;
use crate::domain::session::{QuestionPolicy, SessionState};
use crate::ports::{GateView, SessionGate, SessionGateError};

/// In-memory implementation of the SessionGate port.
///
/// Every operation is a single lock acquisition, so each mutation is an
/// atomic read-modify-write for its session key. The lock is never held
/// across an await point.
pub struct InMemorySessionGate {
    policy: QuestionPolicy,
    sessions: Mutex<HashMap<ClientSessionId, SessionState>>,
}

impl InMemorySessionGate {
    /// Creates an empty gate with the given policy.
    pub fn new(policy: QuestionPolicy) -> Self {
        Self {
            policy,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Number of sessions with recorded state.
    ///
    /// Useful for testing and debugging.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    fn view(&self, state: &SessionState) -> GateView {
        let decision = self.policy.evaluate(state);
        GateView {
            status: self.policy.status(state),
            questions_asked: state.questions_asked,
            remaining: self.policy.remaining(state),
            email_captured: state.email_captured,
            allowed: decision.allowed,
            prompt_for_email: decision.prompt_for_email,
        }
    }
}

#[async_trait]
impl SessionGate for InMemorySessionGate {
    async fn evaluate(&self, session: &ClientSessionId) -> Result<GateView, SessionGateError> {
        let sessions = self.sessions.lock().unwrap();
        let state = sessions.get(session).copied().unwrap_or_default();
        Ok(self.view(&state))
    }

    async fn record_question(
        &self,
        session: &ClientSessionId,
    ) -> Result<GateView, SessionGateError> {
        let mut sessions = self.sessions.lock().unwrap();
        let state = sessions.entry(*session).or_default();
        state.record_question();
        let view = self.view(state);
        Ok(view)
    }

    async fn record_email_captured(
        &self,
        session: &ClientSessionId,
    ) -> Result<GateView, SessionGateError> {
        let mut sessions = self.sessions.lock().unwrap();
        let state = sessions.entry(*session).or_default();
        state.record_email_captured();
        let view = self.view(state);
        Ok(view)
    }
}
