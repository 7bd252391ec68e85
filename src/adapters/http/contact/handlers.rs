//! HTTP handlers for the contact endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::{CaptureEmailCommand, CaptureEmailHandler};
use crate::domain::contact::ContactError;
use crate::ports::{EmailStore, SessionGate};

use super::super::common::{optional_session_id, ErrorResponse, InvalidSessionHeader};
use super::dto::{EmailCaptureRequest, EmailCaptureResponse, InitDbResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the contact endpoints.
#[derive(Clone)]
pub struct ContactAppState {
    pub store: Arc<dyn EmailStore>,
    pub gate: Arc<dyn SessionGate>,
}

impl ContactAppState {
    pub fn capture_email_handler(&self) -> CaptureEmailHandler {
        CaptureEmailHandler::new(self.store.clone(), self.gate.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/emails - Validate and idempotently record an email address
pub async fn capture_email(
    State(state): State<ContactAppState>,
    headers: HeaderMap,
    Json(request): Json<EmailCaptureRequest>,
) -> Result<impl IntoResponse, ContactApiError> {
    let session = optional_session_id(&headers)?;

    let handler = state.capture_email_handler();
    let result = handler
        .handle(CaptureEmailCommand {
            email: request.email,
            source: request.source,
            session,
        })
        .await?;

    Ok(Json(EmailCaptureResponse {
        success: result.accepted,
    }))
}

/// GET /api/db/init - Ensure the email schema exists
pub async fn init_db(
    State(state): State<ContactAppState>,
) -> Result<impl IntoResponse, ContactApiError> {
    state
        .store
        .ensure_schema()
        .await
        .map_err(|err| ContactApiError::Store(err.to_string()))?;

    Ok(Json(InitDbResponse {
        message: "Database initialized successfully".to_string(),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts contact errors to HTTP responses.
#[derive(Debug)]
pub enum ContactApiError {
    /// The submitted address failed validation.
    InvalidEmail(String),
    /// The session header was malformed.
    InvalidSession,
    /// The backing store failed.
    Store(String),
}

impl From<ContactError> for ContactApiError {
    fn from(err: ContactError) -> Self {
        match err {
            ContactError::InvalidEmail(reason) => Self::InvalidEmail(reason.to_string()),
            ContactError::Store(detail) => Self::Store(detail),
        }
    }
}

impl From<InvalidSessionHeader> for ContactApiError {
    fn from(_: InvalidSessionHeader) -> Self {
        Self::InvalidSession
    }
}

impl IntoResponse for ContactApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code, message) = match &self {
            ContactApiError::InvalidEmail(reason) => (
                StatusCode::BAD_REQUEST,
                "INVALID_EMAIL",
                format!("Invalid email address: {}", reason),
            ),
            ContactApiError::InvalidSession => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_FAILED",
                "X-Session-Id must be a UUID".to_string(),
            ),
            ContactApiError::Store(detail) => {
                tracing::error!(detail = %detail, "email store failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Failed to save email".to_string(),
                )
            }
        };

        let body = ErrorResponse::new(error_code, message);
        (status, Json(body)).into_response()
    }
}
