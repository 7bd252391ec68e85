//! CaptureEmailHandler - validates and idempotently records an email address.

use std::sync::Arc;

use crate::domain::contact::{ContactError, EmailAddress};
use crate::domain::foundation::ClientSessionId;
use crate::ports::{EmailStore, SaveOutcome, SessionGate};

/// Command to capture an email address.
#[derive(Debug, Clone)]
pub struct CaptureEmailCommand {
    /// The raw submitted address.
    pub email: String,
    /// Optional origin tag (e.g. "footer_signup").
    pub source: Option<String>,
    /// Session to unblock, when the client identified one.
    pub session: Option<ClientSessionId>,
}

/// Result of an email capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureEmailResult {
    pub accepted: bool,
    pub outcome: SaveOutcome,
}

/// Handler for the capture workflow: validate, persist, unblock.
///
/// Validation happens before any persistence attempt; a duplicate address is
/// a successful no-op. When the command names a session, a successful capture
/// also resets that session's question budget.
pub struct CaptureEmailHandler {
    store: Arc<dyn EmailStore>,
    gate: Arc<dyn SessionGate>,
}

impl CaptureEmailHandler {
    pub fn new(store: Arc<dyn EmailStore>, gate: Arc<dyn SessionGate>) -> Self {
        Self { store, gate }
    }

    pub async fn handle(
        &self,
        cmd: CaptureEmailCommand,
    ) -> Result<CaptureEmailResult, ContactError> {
        let email = EmailAddress::parse(cmd.email)?;

        let outcome = self
            .store
            .save(&email, cmd.source.as_deref())
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "email persistence failed");
                ContactError::store(err.to_string())
            })?;

        if outcome == SaveOutcome::AlreadyKnown {
            tracing::debug!(email = %email, "email already recorded, no-op");
        } else {
            tracing::info!(email = %email, source = ?cmd.source, "email captured");
        }

        if let Some(session) = cmd.session {
            // The address is persisted at this point; a gate hiccup should not
            // turn the capture into a client-visible failure.
            if let Err(err) = self.gate.record_email_captured(&session).await {
                tracing::warn!(%session, error = %err, "failed to unblock session after capture");
            }
        }

        Ok(CaptureEmailResult {
            accepted: true,
            outcome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::adapters::session::InMemorySessionGate;
    use crate::domain::session::{GateStatus, QuestionPolicy};
    use crate::ports::EmailStoreError;

    /// In-memory store mirroring the unique-constraint dedup of the real one.
    struct MockEmailStore {
        records: Mutex<Vec<(String, Option<String>)>>,
        fail_save: bool,
    }

    impl MockEmailStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                records: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn record_count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl EmailStore for MockEmailStore {
        async fn ensure_schema(&self) -> Result<(), EmailStoreError> {
            Ok(())
        }

        async fn save(
            &self,
            email: &EmailAddress,
            source: Option<&str>,
        ) -> Result<SaveOutcome, EmailStoreError> {
            if self.fail_save {
                return Err(EmailStoreError::database("simulated failure"));
            }
            let mut records = self.records.lock().unwrap();
            if records.iter().any(|(e, _)| e == email.as_str()) {
                return Ok(SaveOutcome::AlreadyKnown);
            }
            records.push((email.as_str().to_string(), source.map(String::from)));
            Ok(SaveOutcome::Created)
        }

        async fn exists(&self, email: &EmailAddress) -> Result<bool, EmailStoreError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .any(|(e, _)| e == email.as_str()))
        }
    }

    fn handler_with(
        store: Arc<MockEmailStore>,
    ) -> (CaptureEmailHandler, Arc<InMemorySessionGate>) {
        let gate = Arc::new(InMemorySessionGate::new(QuestionPolicy::new(3)));
        (CaptureEmailHandler::new(store, gate.clone()), gate)
    }

    #[tokio::test]
    async fn valid_email_is_recorded_once() {
        let store = Arc::new(MockEmailStore::new());
        let (handler, _) = handler_with(store.clone());

        let result = handler
            .handle(CaptureEmailCommand {
                email: "user@example.com".to_string(),
                source: Some("footer_signup".to_string()),
                session: None,
            })
            .await
            .unwrap();

        assert!(result.accepted);
        assert_eq!(result.outcome, SaveOutcome::Created);
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn duplicate_submission_is_a_successful_no_op() {
        let store = Arc::new(MockEmailStore::new());
        let (handler, _) = handler_with(store.clone());

        for expected in [SaveOutcome::Created, SaveOutcome::AlreadyKnown] {
            let result = handler
                .handle(CaptureEmailCommand {
                    email: "user@example.com".to_string(),
                    source: None,
                    session: None,
                })
                .await
                .unwrap();
            assert!(result.accepted);
            assert_eq!(result.outcome, expected);
        }
        assert_eq!(store.record_count(), 1);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_without_persistence() {
        let store = Arc::new(MockEmailStore::new());
        let (handler, _) = handler_with(store.clone());

        let err = handler
            .handle(CaptureEmailCommand {
                email: "not-an-email".to_string(),
                source: None,
                session: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContactError::InvalidEmail(_)));
        assert_eq!(store.record_count(), 0);
    }

    #[tokio::test]
    async fn store_failure_surfaces_as_store_error() {
        let store = Arc::new(MockEmailStore::failing());
        let (handler, _) = handler_with(store);

        let err = handler
            .handle(CaptureEmailCommand {
                email: "user@example.com".to_string(),
                source: None,
                session: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ContactError::Store(_)));
    }

    #[tokio::test]
    async fn capture_unblocks_the_named_session() {
        let store = Arc::new(MockEmailStore::new());
        let (handler, gate) = handler_with(store);

        let session = ClientSessionId::new();
        for _ in 0..4 {
            gate.record_question(&session).await.unwrap();
        }
        assert_eq!(
            gate.evaluate(&session).await.unwrap().status,
            GateStatus::Blocked
        );

        handler
            .handle(CaptureEmailCommand {
                email: "user@example.com".to_string(),
                source: None,
                session: Some(session),
            })
            .await
            .unwrap();

        let view = gate.evaluate(&session).await.unwrap();
        assert_eq!(view.status, GateStatus::Free);
        assert!(view.email_captured);
        assert_eq!(view.questions_asked, 0);
    }
}
