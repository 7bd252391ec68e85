//! Shared HTTP plumbing: error body shape and session header extraction.

use axum::http::HeaderMap;
use serde::Serialize;

use crate::domain::foundation::ClientSessionId;

/// Header carrying the client's session identity.
pub const SESSION_HEADER: &str = "x-session-id";

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}

/// The session header was present but not a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSessionHeader;

/// Extracts the optional client session id from the request headers.
///
/// Absent header means the caller keeps its own counter and the gate is
/// bypassed; a present-but-malformed header is the caller's error.
pub fn optional_session_id(
    headers: &HeaderMap,
) -> Result<Option<ClientSessionId>, InvalidSessionHeader> {
    let Some(value) = headers.get(SESSION_HEADER) else {
        return Ok(None);
    };
    value
        .to_str()
        .ok()
        .and_then(|s| s.parse::<ClientSessionId>().ok())
        .map(Some)
        .ok_or(InvalidSessionHeader)
}
