/// LLM Client — the single point of entry for text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// Every failure mode collapses to `ProviderOutcome::Unavailable`; callers
/// only ever branch on "got text" vs "did not".
///
/// Model: gemini-1.5-flash (hardcoded — do not make configurable to prevent drift)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
/// The model used for all generation calls.
pub const MODEL: &str = "gemini-1.5-flash";
/// Label reported to callers for results produced by this provider.
pub const PROVIDER_NAME: &str = "Gemini";
const TEMPERATURE: f32 = 0.7;
const MAX_OUTPUT_TOKENS: u32 = 800;
const TOP_P: f32 = 0.8;
const TOP_K: u32 = 10;
/// Keys at or below this length are treated as placeholders by `is_configured`.
const MIN_USABLE_KEY_LEN: usize = 10;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Result of one generation attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    /// Raw text exactly as returned, unparsed.
    Available(String),
    Unavailable,
}

/// A remote text-generation provider.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Label echoed in results as `ai_provider`.
    fn name(&self) -> &str;

    /// Whether a usable credential is present. Never touches the network.
    fn is_configured(&self) -> bool;

    async fn generate(&self, prompt: &str) -> ProviderOutcome;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub struct ContentPart {
    pub text: Option<String>,
}

impl GeminiResponse {
    /// Text of the first part of the first candidate, if non-empty.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client. The key is injected at construction;
/// the client never reads the environment.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
}

impl LlmClient {
    pub fn new(api_key: Option<String>) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(Duration::from_secs(60)).build()?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Makes one call to the provider and returns the generated text.
    /// No retries: any failure is final for this request.
    pub async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingCredential)?;

        let request_body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        };

        let response = self
            .client
            .post(format!("{GEMINI_API_BASE}/{MODEL}:generateContent"))
            .query(&[("key", api_key)])
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)?;
        let text = parsed.text().ok_or(LlmError::EmptyContent)?;

        debug!("LLM call succeeded: {} chars returned", text.len());
        Ok(text.to_string())
    }
}

#[async_trait]
impl TextProvider for LlmClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn is_configured(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|k| k.len() > MIN_USABLE_KEY_LEN)
    }

    async fn generate(&self, prompt: &str) -> ProviderOutcome {
        match self.call(prompt).await {
            Ok(text) => ProviderOutcome::Available(text),
            Err(LlmError::MissingCredential) => {
                debug!("No provider credential configured; skipping generation");
                ProviderOutcome::Unavailable
            }
            Err(e) => {
                warn!("LLM call failed, falling back: {e}");
                ProviderOutcome::Unavailable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_text_from_first_part() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}], "role": "model"}},
                {"content": {"parts": [{"text": "other"}]}}
            ]
        }"#;
        let response: GeminiResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("first"));
    }

    #[test]
    fn test_response_text_missing_fields() {
        for json in [
            r#"{}"#,
            r#"{"candidates": []}"#,
            r#"{"candidates": [{}]}"#,
            r#"{"candidates": [{"content": {}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{}]}}]}"#,
            r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#,
        ] {
            let response: GeminiResponse = serde_json::from_str(json).unwrap();
            assert_eq!(response.text(), None, "body: {json}");
        }
    }

    #[test]
    fn test_request_serializes_in_gemini_shape() {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart { text: "hello" }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
                top_p: TOP_P,
                top_k: TOP_K,
            },
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 800);
        assert_eq!(value["generationConfig"]["topK"], 10);
    }

    #[test]
    fn test_is_configured_requires_long_key() {
        assert!(!LlmClient::new(None).unwrap().is_configured());
        assert!(!LlmClient::new(Some(String::new())).unwrap().is_configured());
        assert!(!LlmClient::new(Some("short".into())).unwrap().is_configured());
        assert!(LlmClient::new(Some("AIzaSyExampleKey123".into()))
            .unwrap()
            .is_configured());
    }

    #[tokio::test]
    async fn test_missing_credential_is_unavailable() {
        let client = LlmClient::new(None).unwrap();
        assert!(matches!(
            client.call("prompt").await,
            Err(LlmError::MissingCredential)
        ));
        assert_eq!(client.generate("prompt").await, ProviderOutcome::Unavailable);
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(LlmClient::new(None).unwrap().name(), "Gemini");
    }
}
