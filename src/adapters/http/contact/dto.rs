//! HTTP DTOs for the contact endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to capture an email address.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailCaptureRequest {
    /// The submitted address.
    pub email: String,
    /// Optional origin tag (e.g. "footer_signup").
    #[serde(default)]
    pub source: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for a successful capture.
#[derive(Debug, Clone, Serialize)]
pub struct EmailCaptureResponse {
    pub success: bool,
}

/// Response for schema initialization.
#[derive(Debug, Clone, Serialize)]
pub struct InitDbResponse {
    pub message: String,
}
