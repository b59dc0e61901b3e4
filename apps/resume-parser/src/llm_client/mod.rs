//! LLM Client — the single point of entry for all model calls in the resume parser.
//!
//! Field extractors only ever see the `LlmClient` trait. `GeminiClient` is the
//! production implementation over the Gemini `generateContent` REST endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash-lite";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Invalid prompt: {0}")]
    InvalidPrompt(String),

    #[error("Gemini API key is not set. Provide it explicitly or set the GEMINI_API_KEY environment variable")]
    MissingApiKey,

    #[error("Failed to authenticate with Gemini API: {0}")]
    Authentication(String),

    #[error("Failed to connect to Gemini API: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Sampling parameters forwarded to the provider unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
    pub top_k: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_output_tokens: 2048,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Anything that can turn a prompt into a text response.
///
/// Implementations must reject blank prompts with `LlmError::InvalidPrompt`
/// before doing any I/O.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_response(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmError>;
}

/// Rejects prompts with no non-whitespace content.
pub fn validate_prompt(prompt: &str) -> Result<(), LlmError> {
    if prompt.trim().is_empty() {
        return Err(LlmError::InvalidPrompt(
            "Prompt cannot be empty or whitespace only".to_string(),
        ));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationOptions,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `""` when the model produced none.
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<GeminiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    reason: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Connection settings for `GeminiClient`.
/// `api_key: None` falls back to the `GEMINI_API_KEY` environment variable.
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, LlmError> {
        let api_key = resolve_api_key(settings.api_key, std::env::var(API_KEY_ENV).ok())?;
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| LlmError::Network(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            model: settings.model,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    /// Makes a single call to Gemini. There is no retry; callers wrap this if they want one.
    async fn generate_response(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, LlmError> {
        validate_prompt(prompt)?;

        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: *options,
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        if !status.is_success() {
            warn!("Gemini API returned {}: {}", status, body);
            return Err(classify_api_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, output_tokens={}",
                self.model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed.text())
    }
}

fn resolve_api_key(explicit: Option<String>, from_env: Option<String>) -> Result<String, LlmError> {
    explicit
        .or(from_env)
        .filter(|key| !key.trim().is_empty())
        .ok_or(LlmError::MissingApiKey)
}

/// Splits a non-success response into authentication vs. other provider failures,
/// using the status code and Gemini's structured `ErrorInfo.reason`.
fn classify_api_error(status: u16, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<GeminiError>(body).ok();

    let key_rejected = parsed.as_ref().is_some_and(|e| {
        e.error
            .details
            .iter()
            .filter_map(|d| d.reason.as_deref())
            .any(|reason| reason == "API_KEY_INVALID")
    });

    let message = parsed
        .map(|e| e.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| body.to_string());

    if status == 401 || status == 403 || key_rejected {
        LlmError::Authentication(message)
    } else {
        LlmError::Api { status, message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generation_options() {
        let options = GenerationOptions::default();
        assert!((options.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(options.max_output_tokens, 2048);
        assert!((options.top_p - 0.8).abs() < f32::EPSILON);
        assert_eq!(options.top_k, 40);
    }

    #[test]
    fn test_request_body_uses_gemini_field_names() {
        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            generation_config: GenerationOptions {
                temperature: 0.2,
                max_output_tokens: 100,
                top_p: 0.9,
                top_k: 10,
            },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["maxOutputTokens"], 100);
        assert_eq!(json["generationConfig"]["topK"], 10);
        assert!(json["generationConfig"].get("topP").is_some());
    }

    #[test]
    fn test_response_text_joins_parts_of_first_candidate() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "John "}, {"text": "Doe"}], "role": "model"}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 2}
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.text(), "John Doe");
        assert_eq!(parsed.usage_metadata.unwrap().prompt_token_count, 12);
    }

    #[test]
    fn test_response_without_candidates_is_empty_text() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), "");
    }

    #[test]
    fn test_classify_invalid_key_reason_as_authentication() {
        let body = r#"{"error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{"@type": "type.googleapis.com/google.rpc.ErrorInfo", "reason": "API_KEY_INVALID"}]
        }}"#;
        match classify_api_error(400, body) {
            LlmError::Authentication(msg) => assert!(msg.contains("API key not valid")),
            other => panic!("expected Authentication, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_forbidden_as_authentication() {
        assert!(matches!(
            classify_api_error(403, "forbidden"),
            LlmError::Authentication(_)
        ));
    }

    #[test]
    fn test_classify_other_failures_as_api_error() {
        let body = r#"{"error": {"code": 400, "message": "Invalid value at 'contents'", "status": "INVALID_ARGUMENT"}}"#;
        match classify_api_error(400, body) {
            LlmError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Invalid value at 'contents'");
            }
            other => panic!("expected Api, got {other:?}"),
        }
        assert!(matches!(
            classify_api_error(500, "<html>oops</html>"),
            LlmError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_resolve_api_key_prefers_explicit_value() {
        let key = resolve_api_key(Some("explicit".into()), Some("env".into())).unwrap();
        assert_eq!(key, "explicit");
        let key = resolve_api_key(None, Some("env".into())).unwrap();
        assert_eq!(key, "env");
    }

    #[test]
    fn test_resolve_api_key_missing_or_blank() {
        assert!(matches!(resolve_api_key(None, None), Err(LlmError::MissingApiKey)));
        assert!(matches!(
            resolve_api_key(Some("  ".into()), None),
            Err(LlmError::MissingApiKey)
        ));
    }

    #[test]
    fn test_validate_prompt_rejects_blank() {
        assert!(matches!(validate_prompt(""), Err(LlmError::InvalidPrompt(_))));
        assert!(matches!(validate_prompt(" \n\t"), Err(LlmError::InvalidPrompt(_))));
        assert!(validate_prompt("Extract the name").is_ok());
    }

    #[tokio::test]
    async fn test_blank_prompt_rejected_before_network() {
        let client = GeminiClient::new(GeminiSettings {
            api_key: Some("test-key".into()),
            base_url: "http://127.0.0.1:9".into(),
            ..GeminiSettings::default()
        })
        .unwrap();
        let err = client
            .generate_response("   ", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::InvalidPrompt(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = GeminiClient::new(GeminiSettings {
            api_key: Some("test-key".into()),
            base_url: "http://127.0.0.1:9".into(),
            timeout: Duration::from_secs(5),
            ..GeminiSettings::default()
        })
        .unwrap();
        let err = client
            .generate_response("hello", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let client = GeminiClient::new(GeminiSettings {
            api_key: Some("k".into()),
            base_url: "https://example.test/v1beta/".into(),
            ..GeminiSettings::default()
        })
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash-lite:generateContent"
        );
    }
}
