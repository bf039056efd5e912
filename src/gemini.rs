//! Gemini API client for the assistant tab
//!
//! `TextGenerator` is the seam between the assistant bridge and whatever
//! produces text; `GeminiClient` speaks the `generateContent` REST format.
//! Uses a long-lived reqwest::Client for connection pooling.

use crate::error::BankingError;
use crate::models::MessageRole;
use crate::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

/// One provider call: system instruction plus conversation turns.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    /// Oldest first; the last entry is the user's query
    pub contents: Vec<Turn>,
    pub system_instruction: String,
    pub temperature: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub role: MessageRole,
    pub text: String,
}

/// Provider output; `text` is `None` when nothing usable came back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResponse {
    pub text: Option<String>,
}

/// Trait for text-generation providers
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse>;
}

/// Reusable Gemini client (connection-pooled)
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(8)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse> {
        if self.api_key.is_empty() {
            return Err(BankingError::AssistantProvider(
                "GEMINI_API_KEY not configured".to_string(),
            ));
        }

        let body = GeminiRequest::from(request);

        debug!(model = %request.model, turns = request.contents.len(), "Calling Gemini API");

        let response = self
            .client
            .post(self.endpoint(&request.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Gemini API request failed: {}", e);
                BankingError::AssistantProvider(format!("request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            error!(status = %status, "Gemini API error response: {}", error_text);
            return Err(BankingError::AssistantProvider(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let gemini_response: GeminiResponse = response.json().await.map_err(|e| {
            error!("Failed to parse Gemini response: {}", e);
            BankingError::AssistantProvider(format!("parse error: {}", e))
        })?;

        Ok(GenerationResponse {
            text: gemini_response.text(),
        })
    }
}

//
// ================= Wire format =================
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    contents: Vec<Content>,
    system_instruction: Content,
    generation_config: GenerationConfig,
}

impl From<&GenerationRequest> for GeminiRequest {
    fn from(request: &GenerationRequest) -> Self {
        Self {
            contents: request
                .contents
                .iter()
                .map(|turn| Content {
                    role: Some(wire_role(turn.role).to_string()),
                    parts: vec![Part {
                        text: Some(turn.text.clone()),
                    }],
                })
                .collect(),
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(request.system_instruction.clone()),
                }],
            },
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }
}

fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => "user",
        MessageRole::Assistant => "model",
    }
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Content,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate, `None` if empty.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_request() -> GenerationRequest {
        GenerationRequest {
            model: "gemini-3-flash-preview".to_string(),
            contents: vec![Turn {
                role: MessageRole::User,
                text: "What is RAKrewards?".to_string(),
            }],
            system_instruction: "You are the RAKBANK Digital Assistant.".to_string(),
            temperature: 0.7,
        }
    }

    #[test]
    fn test_request_serialization() {
        let json = serde_json::to_value(GeminiRequest::from(&sample_request())).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "What is RAKrewards?");
        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are the RAKBANK Digital Assistant."
        );
        assert!(json["systemInstruction"].get("role").is_none());
        let temperature = json["generationConfig"]["temperature"].as_f64().unwrap();
        assert!((temperature - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_assistant_turns_use_model_role() {
        let mut request = sample_request();
        request.contents.insert(
            0,
            Turn {
                role: MessageRole::Assistant,
                text: "Welcome back".to_string(),
            },
        );

        let json = serde_json::to_value(GeminiRequest::from(&request)).unwrap();
        assert_eq!(json["contents"][0]["role"], "model");
        assert_eq!(json["contents"][1]["role"], "user");
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello, "}, {"text": "Adam."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 3}
        }"#;

        let response: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(response.text().as_deref(), Some("Hello, Adam."));
    }

    #[test]
    fn test_response_without_text() {
        let no_candidates: GeminiResponse = serde_json::from_str("{}").unwrap();
        assert!(no_candidates.text().is_none());

        let blocked: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(blocked.text().is_none());

        let empty: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": ""}]}}]}"#)
                .unwrap();
        assert!(empty.text().is_none());

        let spaces: GeminiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{"text": "  "}]}}]}"#)
                .unwrap();
        assert_eq!(spaces.text().as_deref(), Some("  "));
    }

    #[tokio::test]
    async fn test_missing_api_key() {
        let client = GeminiClient::new(
            String::new(),
            "http://127.0.0.1:9".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        let result = client.generate(&sample_request()).await;
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_endpoint() {
        let client = GeminiClient::new(
            "key".to_string(),
            "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();

        assert_eq!(
            client.endpoint("gemini-3-flash-preview"),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
