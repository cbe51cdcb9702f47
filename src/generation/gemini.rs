// src/generation/gemini.rs
//! Thin HTTP client for the Gemini `generateContent` endpoint.
//!
//! Authentication, request encoding and error classification live here;
//! what the text means is the orchestrator's business.

use super::{CompletionRequest, LanguageModel};
use crate::error::{preview_body, AppError, GenerationStage};
use crate::types::ApiKey;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};

/// A reqwest client preconfigured with the Gemini API key.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client against `base_url`, normally `GEMINI_API_BASE_URL`.
    pub fn with_base_url(api_key: &ApiKey, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let mut key = header::HeaderValue::from_str(api_key.as_str()).map_err(|e| {
            AppError::MissingConfiguration(format!("Invalid Gemini API key format: {}", e))
        })?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait::async_trait]
impl LanguageModel for GeminiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, AppError> {
        let url = self.endpoint(&request.model);
        let body = GenerateContentRequest::from(request);

        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::generation(GenerationStage::Transport, e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::generation(GenerationStage::Transport, e.to_string()))?;

        log::debug!("Gemini responded with {} ({} bytes)", status, text.len());

        if !status.is_success() {
            return Err(provider_error(status.as_u16(), &text));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text).map_err(|e| {
            AppError::generation(
                GenerationStage::EmptyResponse,
                format!("unexpected response body ({}): {}", e, preview_body(&text)),
            )
        })?;

        parsed.into_text()
    }
}

/// Classifies a non-success Gemini response.
fn provider_error(status: u16, body: &str) -> AppError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(code) => format!("{}: {}", code, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => preview_body(body),
    };
    log::error!("Gemini request failed with HTTP {}: {}", status, message);
    AppError::generation(GenerationStage::Provider { status }, message)
}

// --- Wire types ---

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

impl<'a> From<&'a CompletionRequest> for GenerateContentRequest<'a> {
    fn from(request: &'a CompletionRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                response_mime_type: "application/json",
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, AppError> {
        let block_reason = self.prompt_feedback.and_then(|f| f.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            let reason = block_reason.unwrap_or_else(|| "no candidates".to_string());
            return Err(AppError::generation(GenerationStage::EmptyResponse, reason));
        };

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            let reason = candidate
                .finish_reason
                .map(|r| format!("candidate finished with {}", r))
                .unwrap_or_else(|| "candidate has no text".to_string());
            return Err(AppError::generation(GenerationStage::EmptyResponse, reason));
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CompletionRequest {
        CompletionRequest {
            model: "gemini-2.5-flash".to_string(),
            prompt: "Make slides".to_string(),
            temperature: 0.2,
            max_output_tokens: 10_000,
        }
    }

    #[test]
    fn request_body_uses_gemini_field_names() {
        let request = request();
        let body = serde_json::to_value(GenerateContentRequest::from(&request)).unwrap();
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Make slides");
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 10_000);
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn response_text_joins_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}, "finishReason": "STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_text().unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn blocked_prompt_is_reported() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"promptFeedback": {"blockReason": "SAFETY"}}"#).unwrap();
        let err = response.into_text().unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }

    #[test]
    fn provider_errors_keep_status_and_message() {
        let err = provider_error(
            429,
            r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#,
        );
        match err {
            AppError::Generation { stage, message } => {
                assert_eq!(stage, GenerationStage::Provider { status: 429 });
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn endpoint_includes_model() {
        let client = GeminiClient::with_base_url(
            &ApiKey::new("AIzaSyExample").unwrap(),
            "http://localhost:9000/v1beta/",
        )
        .unwrap();
        assert_eq!(
            client.endpoint("gemini-2.5-flash"),
            "http://localhost:9000/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
