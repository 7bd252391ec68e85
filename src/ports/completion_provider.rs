//! Completion Provider Port - Interface for the text-generation model.
//!
//! The external model is an opaque call: it accepts an instruction/input pair
//! and returns literal output text. Both the router and the answer generator
//! go through this port, so tests can swap in a mock and the HTTP adapter can
//! swap providers without touching the workflow.
//!
//! Nothing behind this port retries. Failure classification exists so the
//! caller can log precisely, not so it can recover differently.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for text-generation model calls.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Generates one completion for an instruction/input pair.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError>;

    /// Provider identification (name, model).
    fn provider_info(&self) -> ProviderInfo;
}

/// Request for a model completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System-style instructions guiding the model (persona script or router
    /// prompt preamble). Optional: the router sends everything as input.
    pub instructions: Option<String>,
    /// The input text the model responds to.
    pub input: String,
    /// Maximum tokens to generate.
    pub max_output_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request with the given input and no instructions.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            instructions: None,
            input: input.into(),
            max_output_tokens: None,
            temperature: None,
        }
    }

    /// Sets the instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Sets the maximum output tokens.
    pub fn with_max_output_tokens(mut self, max: u32) -> Self {
        self.max_output_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from a model completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionResponse {
    /// The model's literal output text.
    pub output_text: String,
    /// Model that generated the response.
    pub model: String,
}

/// Provider identification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderInfo {
    /// Provider name (e.g. "openai", "mock").
    pub name: String,
    /// Model identifier (e.g. "gpt-4o").
    pub model: String,
}

impl ProviderInfo {
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
        }
    }
}

/// Completion provider errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable (5xx).
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse the provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl CompletionError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}
