//! Email Store Port - Interface for the persisted contact list.

use async_trait::async_trait;

use crate::domain::contact::EmailAddress;

/// Port for the persisted email store.
///
/// The store enforces address uniqueness itself; `save` is idempotent and a
/// duplicate submission is a successful no-op, never an error.
#[async_trait]
pub trait EmailStore: Send + Sync {
    /// Creates the backing schema if it does not exist.
    ///
    /// Idempotent and safe to call concurrently or repeatedly; run once at
    /// process startup and exposed for explicit re-initialization.
    async fn ensure_schema(&self) -> Result<(), EmailStoreError>;

    /// Records an address, deduplicating on the address itself.
    async fn save(
        &self,
        email: &EmailAddress,
        source: Option<&str>,
    ) -> Result<SaveOutcome, EmailStoreError>;

    /// Checks whether an address is already recorded.
    async fn exists(&self, email: &EmailAddress) -> Result<bool, EmailStoreError>;
}

/// Outcome of an idempotent save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new record was created.
    Created,
    /// The address was already recorded; nothing changed.
    AlreadyKnown,
}

/// Email store errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EmailStoreError {
    /// The underlying database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// Schema initialization failed.
    #[error("schema initialization failed: {0}")]
    Schema(String),
}

impl EmailStoreError {
    /// Creates a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    /// Creates a schema error.
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema(message.into())
    }
}
