//! OpenAI Provider - Implementation of CompletionProvider for the Responses API.
//!
//! Sends one `(instructions, input)` pair per call to `POST /responses` and
//! returns the model's literal output text. Calls are single-shot: a failed
//! call is reported, never retried.
//!
//! # Configuration
//!
//! ```ignore
//! let config = OpenAIConfig::new(api_key)
//!     .with_model("gpt-4o")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let provider = OpenAIProvider::new(config);
//! ```

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    CompletionError, CompletionProvider, CompletionRequest, CompletionResponse, ProviderInfo,
};

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Model to use (e.g. "gpt-4o").
    pub model: String,
    /// Base URL for the API (default: https://api.openai.com/v1).
    pub base_url: String,
    /// Per-call request timeout.
    pub timeout: Duration,
}

impl OpenAIConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI Responses API provider implementation.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    /// Creates a new OpenAI provider with the given configuration.
    pub fn new(config: OpenAIConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Builds the responses endpoint URL.
    fn responses_url(&self) -> String {
        format!("{}/responses", self.config.base_url)
    }

    /// Converts our request to the Responses API format.
    fn to_api_request(&self, request: &CompletionRequest) -> ResponsesApiRequest {
        ResponsesApiRequest {
            model: self.config.model.clone(),
            input: request.input.clone(),
            instructions: request.instructions.clone(),
            max_output_tokens: request.max_output_tokens,
            temperature: request.temperature,
        }
    }

    /// Sends a request and classifies transport errors.
    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, CompletionError> {
        let api_request = self.to_api_request(request);

        self.client
            .post(self.responses_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(&api_request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    CompletionError::network(format!("Connection failed: {}", e))
                } else {
                    CompletionError::network(e.to_string())
                }
            })
    }

    /// Maps non-success statuses to completion errors.
    async fn handle_response_status(
        &self,
        response: Response,
    ) -> Result<Response, CompletionError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 => Err(CompletionError::AuthenticationFailed),
            429 => Err(CompletionError::rate_limited(parse_retry_after(
                &error_body,
            ))),
            400 => Err(CompletionError::InvalidRequest(error_body)),
            500..=599 => Err(CompletionError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(CompletionError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }

    /// Parses the response body into a completion.
    async fn parse_response(
        &self,
        response: Response,
    ) -> Result<CompletionResponse, CompletionError> {
        let response = self.handle_response_status(response).await?;

        let api_response: ResponsesApiResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::parse(format!("Failed to parse response: {}", e)))?;

        let output_text = extract_output_text(&api_response)?;

        Ok(CompletionResponse {
            output_text,
            model: api_response.model,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAIProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let response = self.send_request(&request).await?;
        self.parse_response(response).await
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("openai", &self.config.model)
    }
}

/// Parses retry-after from a rate limit error body.
///
/// The API sometimes embeds "try again in Xs" in the error message; defaults
/// to 30 seconds when absent.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(msg) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = msg.find("try again in ") {
                let rest = &msg[idx + 13..];
                if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                    if let Ok(secs) = rest[..num_end].parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    30
}

/// Pulls the output text out of a Responses API body.
///
/// Prefers the flattened `output_text` field when the server includes it,
/// otherwise concatenates the `output_text` content parts of the output
/// message items.
fn extract_output_text(response: &ResponsesApiResponse) -> Result<String, CompletionError> {
    if let Some(ref text) = response.output_text {
        return Ok(text.clone());
    }

    let mut pieces = Vec::new();
    for item in response.output.iter().flatten() {
        for part in item.content.iter().flatten() {
            if part.kind == "output_text" {
                if let Some(ref text) = part.text {
                    pieces.push(text.as_str());
                }
            }
        }
    }

    if pieces.is_empty() {
        return Err(CompletionError::parse("No output text in response"));
    }
    Ok(pieces.concat())
}

// ----- Responses API Types -----

#[derive(Debug, Serialize)]
struct ResponsesApiRequest {
    model: String,
    input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ResponsesApiResponse {
    model: String,
    output_text: Option<String>,
    output: Option<Vec<OutputItem>>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    content: Option<Vec<ContentPart>>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_works() {
        let config = OpenAIConfig::new("test-key")
            .with_model("gpt-4o-mini")
            .with_base_url("https://custom.api.com/v1")
            .with_timeout(Duration::from_secs(30));

        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.base_url, "https://custom.api.com/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn responses_url_appends_endpoint() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k"));
        assert_eq!(
            provider.responses_url(),
            "https://api.openai.com/v1/responses"
        );
    }

    #[test]
    fn api_request_skips_absent_options() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k"));
        let api_request = provider.to_api_request(&CompletionRequest::new("hello"));
        let json = serde_json::to_string(&api_request).unwrap();
        assert!(json.contains("\"input\":\"hello\""));
        assert!(!json.contains("instructions"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn api_request_carries_instructions() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k"));
        let api_request = provider
            .to_api_request(&CompletionRequest::new("q").with_instructions("You are Steve Jobs."));
        let json = serde_json::to_string(&api_request).unwrap();
        assert!(json.contains("\"instructions\":\"You are Steve Jobs.\""));
    }

    #[test]
    fn extract_prefers_flattened_output_text() {
        let response: ResponsesApiResponse = serde_json::from_str(
            r#"{"model":"gpt-4o","output_text":"Hello there","output":[]}"#,
        )
        .unwrap();
        assert_eq!(extract_output_text(&response).unwrap(), "Hello there");
    }

    #[test]
    fn extract_concatenates_output_items() {
        let response: ResponsesApiResponse = serde_json::from_str(
            r#"{
                "model": "gpt-4o",
                "output": [
                    {"content": [{"type": "output_text", "text": "Think "}]},
                    {"content": [
                        {"type": "reasoning", "text": "ignored"},
                        {"type": "output_text", "text": "different."}
                    ]}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(extract_output_text(&response).unwrap(), "Think different.");
    }

    #[test]
    fn extract_fails_on_empty_output() {
        let response: ResponsesApiResponse =
            serde_json::from_str(r#"{"model":"gpt-4o","output":[]}"#).unwrap();
        assert!(matches!(
            extract_output_text(&response),
            Err(CompletionError::Parse(_))
        ));
    }

    #[test]
    fn parse_retry_after_from_message() {
        let error = r#"{"error":{"message":"Rate limit exceeded. Please try again in 30 seconds."}}"#;
        assert_eq!(parse_retry_after(error), 30);
    }

    #[test]
    fn parse_retry_after_default() {
        let error = r#"{"error":{"message":"Something went wrong"}}"#;
        assert_eq!(parse_retry_after(error), 30);
    }

    #[test]
    fn provider_info_reports_model() {
        let provider = OpenAIProvider::new(OpenAIConfig::new("k").with_model("gpt-4o"));
        let info = provider.provider_info();
        assert_eq!(info.name, "openai");
        assert_eq!(info.model, "gpt-4o");
    }
}
