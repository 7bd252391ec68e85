//! Free-question budget state machine.
//!
//! Pure gate logic: counting completed questions against a configured budget
//! and deriving the access state. Storage and synchronization live behind the
//! `SessionGate` port; this module owns only the transitions.

use serde::{Deserialize, Serialize};

/// Per-session usage state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Completed (not merely attempted) questions this session has asked.
    pub questions_asked: u32,
    /// Whether an email has been captured for this session.
    pub email_captured: bool,
}

impl SessionState {
    /// Fresh session: nothing asked, no email captured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed question.
    pub fn record_question(&mut self) {
        self.questions_asked += 1;
    }

    /// Records a successful email capture.
    ///
    /// Every capture path unblocks: the question count resets to zero and the
    /// session is marked captured.
    pub fn record_email_captured(&mut self) {
        self.questions_asked = 0;
        self.email_captured = true;
    }
}

/// Access state derived from the question count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateStatus {
    /// Under budget: may ask silently.
    Free,
    /// Exactly at budget: may still ask, but the upsell prompt is shown after
    /// the answer.
    AtLimit,
    /// Over budget: further questions are disallowed until an email is
    /// captured.
    Blocked,
}

/// Outcome of evaluating the gate for a new question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether a new question may be asked.
    pub allowed: bool,
    /// Whether to prompt for an email after the answer.
    pub prompt_for_email: bool,
}

/// The configured free-question budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionPolicy {
    max_questions: u32,
}

impl QuestionPolicy {
    /// Creates a policy with the given budget.
    pub fn new(max_questions: u32) -> Self {
        Self { max_questions }
    }

    /// The free-question budget.
    pub fn max_questions(&self) -> u32 {
        self.max_questions
    }

    /// Derives the access state for a session.
    pub fn status(&self, state: &SessionState) -> GateStatus {
        if state.questions_asked < self.max_questions {
            GateStatus::Free
        } else if state.questions_asked == self.max_questions {
            GateStatus::AtLimit
        } else {
            GateStatus::Blocked
        }
    }

    /// Decides whether a session may ask a new question right now.
    pub fn evaluate(&self, state: &SessionState) -> GateDecision {
        let status = self.status(state);
        GateDecision {
            allowed: status != GateStatus::Blocked,
            prompt_for_email: status == GateStatus::AtLimit,
        }
    }

    /// Questions left before the upsell state.
    pub fn remaining(&self, state: &SessionState) -> u32 {
        self.max_questions.saturating_sub(state.questions_asked)
    }
}

impl Default for QuestionPolicy {
    fn default() -> Self {
        Self::new(3)
    }
}
