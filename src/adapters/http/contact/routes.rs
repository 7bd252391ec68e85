//! Axum router configuration for the contact endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{capture_email, init_db, ContactAppState};

/// Create the contact API router.
///
/// # Routes
///
/// - `POST /emails` - validate and idempotently record an email address
/// - `GET /db/init` - ensure the email schema exists
///
/// Mount under `/api` and supply a [`ContactAppState`].
pub fn contact_router() -> Router<ContactAppState> {
    Router::new()
        .route("/emails", post(capture_email))
        .route("/db/init", get(init_db))
}
