//! PostgreSQL implementation of EmailStore.
//!
//! One table, append-only plus unique-constraint dedup. No locking beyond
//! what the constraint already provides.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::contact::EmailAddress;
use crate::ports::{EmailStore, EmailStoreError, SaveOutcome};

const CREATE_EMAILS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS emails (
    id SERIAL PRIMARY KEY,
    email VARCHAR(255) NOT NULL UNIQUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT CURRENT_TIMESTAMP,
    source VARCHAR(255)
)";

const INSERT_EMAIL: &str = "\
INSERT INTO emails (email, source)
VALUES ($1, $2)
ON CONFLICT (email) DO NOTHING
RETURNING id";

const EMAIL_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM emails WHERE email = $1)";

/// PostgreSQL implementation of the EmailStore port.
pub struct PgEmailStore {
    pool: PgPool,
    schema_ready: AtomicBool,
}

impl PgEmailStore {
    /// Creates a new PgEmailStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema_ready: AtomicBool::new(false),
        }
    }
}

/// Database row representation of a captured email.
#[derive(Debug, sqlx::FromRow)]
#[allow(dead_code)]
struct EmailRow {
    id: i32,
    email: String,
    created_at: Option<DateTime<Utc>>,
    source: Option<String>,
}

#[async_trait]
impl EmailStore for PgEmailStore {
    async fn ensure_schema(&self) -> Result<(), EmailStoreError> {
        // CREATE TABLE IF NOT EXISTS is itself idempotent; the flag just
        // skips the round-trip after the first success. Concurrent first
        // calls both run the statement, which is safe.
        if self.schema_ready.load(Ordering::Acquire) {
            return Ok(());
        }

        sqlx::query(CREATE_EMAILS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| EmailStoreError::schema(e.to_string()))?;

        self.schema_ready.store(true, Ordering::Release);
        tracing::info!("emails table ready");
        Ok(())
    }

    async fn save(
        &self,
        email: &EmailAddress,
        source: Option<&str>,
    ) -> Result<SaveOutcome, EmailStoreError> {
        let inserted: Option<i32> = sqlx::query_scalar(INSERT_EMAIL)
            .bind(email.as_str())
            .bind(source)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| EmailStoreError::database(e.to_string()))?;

        Ok(match inserted {
            Some(_) => SaveOutcome::Created,
            None => SaveOutcome::AlreadyKnown,
        })
    }

    async fn exists(&self, email: &EmailAddress) -> Result<bool, EmailStoreError> {
        sqlx::query_scalar(EMAIL_EXISTS)
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| EmailStoreError::database(e.to_string()))
    }
}
